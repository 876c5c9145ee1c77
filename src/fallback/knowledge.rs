//! Static characterology knowledge base for degraded-mode answers.
//!
//! Content follows René Le Senne's treatise: three fundamental properties
//! (Émotivité, Activité, Retentissement) combining into eight character
//! types. Everything here is compiled in so the degraded path needs no I/O.

/// One of the eight Le Senne character types.
#[derive(Debug, Clone, Copy)]
pub struct CharacterType {
    pub name: &'static str,
    /// Property formula, e.g. "Émotif, non-Actif, Primaire".
    pub formula: &'static str,
    pub traits: [&'static str; 4],
    pub examples: &'static str,
}

pub const CHARACTER_TYPES: [CharacterType; 8] = [
    CharacterType {
        name: "Nerveux",
        formula: "Émotif, non-Actif, Primaire",
        traits: ["sensible", "expressif", "spontané", "instable"],
        examples: "artistes, créateurs impulsifs",
    },
    CharacterType {
        name: "Sentimental",
        formula: "Émotif, non-Actif, Secondaire",
        traits: ["introspectif", "mélancolique", "fidèle", "rancunier"],
        examples: "poètes romantiques, penseurs solitaires",
    },
    CharacterType {
        name: "Colérique",
        formula: "Émotif, Actif, Primaire",
        traits: ["énergique", "impulsif", "enthousiaste", "variable"],
        examples: "leaders charismatiques, entrepreneurs",
    },
    CharacterType {
        name: "Passionné",
        formula: "Émotif, Actif, Secondaire",
        traits: ["intense", "persévérant", "dominateur", "obstiné"],
        examples: "révolutionnaires, grands dirigeants",
    },
    CharacterType {
        name: "Sanguin",
        formula: "non-Émotif, Actif, Primaire",
        traits: ["pratique", "adaptable", "optimiste", "superficiel"],
        examples: "hommes d'affaires, politiciens pragmatiques",
    },
    CharacterType {
        name: "Flegmatique",
        formula: "non-Émotif, Actif, Secondaire",
        traits: ["méthodique", "persévérant", "froid", "efficace"],
        examples: "administrateurs, techniciens rigoureux",
    },
    CharacterType {
        name: "Amorphe",
        formula: "non-Émotif, non-Actif, Primaire",
        traits: ["indolent", "négligent", "bon vivant", "paresseux"],
        examples: "personnes sans ambition particulière",
    },
    CharacterType {
        name: "Apathique",
        formula: "non-Émotif, non-Actif, Secondaire",
        traits: ["indifférent", "stable", "routinier", "objectif"],
        examples: "observateurs détachés, érudits",
    },
];

pub const FAQ_CHARACTEROLOGY: &str = "\
**La Caractérologie selon René Le Senne**

La caractérologie est la science qui étudie les **types de caractères** basée sur trois propriétés fondamentales :

🔹 **L'Émotivité** : tendance à être affecté par les événements
🔹 **L'Activité** : tendance à l'action et à la réalisation
🔹 **Le Retentissement** : impact durable (Secondaire) ou immédiat (Primaire) des impressions

Ces trois dimensions se combinent pour former **8 types de caractères** distincts.";

pub const FAQ_TYPES_LIST: &str = "\
**Les 8 Types Caractérologiques de René Le Senne**

**Types Émotifs :**
• **Nerveux** (É, nA, P) - Sensible et spontané
• **Sentimental** (É, nA, S) - Introspectif et fidèle
• **Colérique** (É, A, P) - Énergique et impulsif
• **Passionné** (É, A, S) - Intense et persévérant

**Types non-Émotifs :**
• **Sanguin** (nÉ, A, P) - Pratique et adaptable
• **Flegmatique** (nÉ, A, S) - Méthodique et efficace
• **Amorphe** (nÉ, nA, P) - Indolent et bon vivant
• **Apathique** (nÉ, nA, S) - Indifférent et routinier";

pub const FAQ_EMOTIVITY: &str = "\
**L'Émotivité en Caractérologie**

L'émotivité mesure la **tendance à être ému** par les événements, personnes ou situations.

**Émotif (É) :**
- Réagit fortement aux stimuli
- Ressent intensément joies et peines
- Expressif dans ses réactions
- Vulnérable aux influences extérieures

**Non-Émotif (nÉ) :**
- Réactions mesurées et contrôlées
- Stabilité émotionnelle
- Objectivité face aux événements
- Résistance aux influences";

pub const FAQ_ACTIVITY: &str = "\
**L'Activité en Caractérologie**

L'activité mesure la **tendance à l'action** et à la réalisation concrète.

**Actif (A) :**
- Besoin d'agir et de réaliser
- Énergie dirigée vers l'extérieur
- Goût pour l'entreprise
- Difficulté à rester inactif

**Non-Actif (nA) :**
- Préférence pour la contemplation
- Énergie dirigée vers l'intérieur
- Goût pour la réflexion
- Confort dans l'immobilité";

pub const FAQ_RESONANCE: &str = "\
**Le Retentissement en Caractérologie**

Le retentissement mesure la **durée d'impact** des impressions sur la conscience.

**Primaire (P) :**
- Impressions immédiates et fugaces
- Vit dans l'instant présent
- Oublie rapidement
- Adaptabilité et spontanéité

**Secondaire (S) :**
- Impressions durables et persistantes
- Influence du passé sur le présent
- Mémoire tenace
- Persévérance et fidélité";

pub const TYPE_IDENTIFICATION_GUIDE: &str = "\
**Guide d'Auto-Identification de votre Type**

Pour déterminer votre type caractérologique, posez-vous ces questions :

**🔹 Émotivité :**
- Êtes-vous facilement ému par les événements ?
- Vos réactions sont-elles intenses et visibles ?
- Êtes-vous sensible aux atmosphères ?

**🔹 Activité :**
- Avez-vous besoin d'agir, de réaliser des projets ?
- Préférez-vous l'action à la contemplation ?
- Êtes-vous entreprenant dans la vie ?

**🔹 Retentissement :**
- Gardez-vous longtemps en mémoire les événements marquants ?
- Le passé influence-t-il fortement votre présent ?
- Êtes-vous fidèle en amitié et en amour ?

**Exemple :** Si vous répondez Oui-Oui-Non, vous pourriez être **Colérique** (Émotif, Actif, Primaire).";

pub const TIPS_BEGINNER: [&str; 4] = [
    "La caractérologie étudie la **personnalité innée** de chaque individu",
    "Elle identifie **8 types de caractères** basés sur 3 propriétés fondamentales",
    "C'est un outil de **connaissance de soi** et de compréhension d'autrui",
    "René Le Senne est le père de cette discipline scientifique",
];

pub const TIPS_INTERMEDIATE: [&str; 4] = [
    "La triade Émotivité-Activité-Retentissement forme le socle de la typologie",
    "Chaque type a ses **forces** et ses **zones de développement**",
    "La caractérologie aide à **adapter son comportement** selon les situations",
    "Elle éclaire les **relations interpersonnelles** et les choix de vie",
];

pub const TIPS_ADVANCED: [&str; 4] = [
    "Les **formules caractérologiques** permettent une analyse précise",
    "Les **propriétés supplémentaires** enrichissent le portrait (largeur, ampleur...)",
    "La **psychodialectique** explore l'évolution des types",
    "L'application pratique concerne l'**orientation** et le **développement personnel**",
];

pub const EXPLORATION_SUGGESTIONS: [&str; 5] = [
    "🔍 Découvrez votre type caractérologique avec les questions d'auto-analyse",
    "📚 Explorez les relations entre les différents types de caractères",
    "🎯 Apprenez à identifier les types dans votre entourage",
    "💡 Comprenez comment votre type influence vos choix de vie",
    "🌟 Développez vos points forts et travaillez vos zones d'amélioration",
];

pub const DEGRADED_MODE_NOTICE: &str = "\
⚠️ **Mode dégradé** - Le service IA est temporairement indisponible. Cette réponse provient \
de notre base de connaissances caractérologiques. Pour une analyse personnalisée, réessayez \
dans quelques instants.";

/// Last line of defense when even the canned assembly misses.
pub const MINIMAL_FALLBACK: &str = "\
**Service temporairement indisponible**

Le service IA n'est pas disponible actuellement.

**En attendant :**
- La caractérologie étudie les types de caractères innés
- Elle se base sur 3 propriétés : Émotivité, Activité, Retentissement
- René Le Senne a identifié 8 types caractérologiques

Réessayez dans quelques instants pour une analyse personnalisée.";

pub const OFFLINE_GUIDANCE: &str = "\
**💡 Que faire pendant l'indisponibilité du service ?**

**📚 Explorez les concepts de base :**
- Posez des questions sur l'émotivité, l'activité, le retentissement
- Demandez des informations sur les 8 types caractérologiques
- Explorez les définitions et concepts fondamentaux

**🔍 Auto-analyse :**
- Utilisez les guides d'identification de type
- Réfléchissez à vos traits caractérologiques
- Observez les types dans votre entourage

**⏰ Service complet bientôt disponible :**
Le système reviendra automatiquement dès que le service IA sera rétabli pour des réponses \
personnalisées et approfondies.";
