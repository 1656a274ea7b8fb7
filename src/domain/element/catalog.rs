//! Static prompt and element catalog
//!
//! Pure lookups keyed by [`Element`]: journaling prompts, display colors,
//! the polyhedron drawn for each element, and descriptive details.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::tag::Element;

const EARTH_PROMPTS: &[&str] = &[
    "Where have you felt most grounded and secure recently?",
    "What physical sensations are you noticing in your body right now?",
    "Describe a place in nature that makes you feel connected to the earth.",
    "What practices help you feel stable and rooted?",
];

const WATER_PROMPTS: &[&str] = &[
    "What emotions have been flowing through you today?",
    "How do you allow yourself to feel without judgment?",
    "What needs to be released or let go of?",
    "Describe the quality of your emotional state like water—still, flowing, turbulent?",
];

const FIRE_PROMPTS: &[&str] = &[
    "What is something you feel passionate or energized about right now?",
    "What action could you take today that excites you?",
    "Where do you feel your inner spark calling you forward?",
    "What would you create if fear was not holding you back?",
];

const AIR_PROMPTS: &[&str] = &[
    "Which thoughts have been swirling in your mind lately?",
    "What clarity are you seeking right now?",
    "How can you create more mental space today?",
    "What ideas want to be expressed or communicated?",
];

const SPIRIT_PROMPTS: &[&str] = &[
    "What brings you a sense of connection to something greater?",
    "What are you grateful for in this moment?",
    "How do you experience the divine or unity in your life?",
    "What is your soul asking you to pay attention to?",
];

/// Platonic solid drawn for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polyhedron {
    Cube,
    Icosahedron,
    Tetrahedron,
    Octahedron,
    Dodecahedron,
}

impl Polyhedron {
    pub const fn faces(&self) -> u32 {
        match self {
            Self::Cube => 6,
            Self::Icosahedron => 20,
            Self::Tetrahedron => 4,
            Self::Octahedron => 8,
            Self::Dodecahedron => 12,
        }
    }

    pub const fn vertices(&self) -> u32 {
        match self {
            Self::Cube => 8,
            Self::Icosahedron => 12,
            Self::Tetrahedron => 4,
            Self::Octahedron => 6,
            Self::Dodecahedron => 20,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Icosahedron => "icosahedron",
            Self::Tetrahedron => "tetrahedron",
            Self::Octahedron => "octahedron",
            Self::Dodecahedron => "dodecahedron",
        }
    }
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape and scale of the wireframe solid for an element.
/// `size` is the edge length for the cube and the circumradius otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDescriptor {
    pub shape: Polyhedron,
    pub size: f32,
}

/// 24-bit RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Descriptive text shown alongside an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDetails {
    pub name: &'static str,
    pub figure: &'static str,
    pub description: &'static str,
    pub nature_action: &'static str,
    pub quick_facts: &'static [&'static str],
}

const EARTH_DETAILS: ElementDetails = ElementDetails {
    name: "Earth",
    figure: "Cube • Hexahedron",
    description: "The cube is the most stable of the Platonic solids, echoing the steady heartbeat of soil and stone.",
    nature_action: "Press your bare feet into soil or hold a smooth stone and study its details for 30 seconds.",
    quick_facts: &[
        "Faces always meet at right angles, representing structure and ritual.",
        "Aligned with the root chakra & long exhales.",
        "Best used when journaling about anchors and foundations.",
        "Six faces mirror the six cardinal directions in sacred geometry.",
        "Mineralogists link cubes to crystalline lattices, a reminder of slow growth.",
    ],
};

const WATER_DETAILS: ElementDetails = ElementDetails {
    name: "Water",
    figure: "Icosahedron",
    description: "Twenty triangular faces mirror endless ripples—each angle a new current or emotional tide.",
    nature_action: "Cup water in your hands and feel its movement, or listen closely to running water for a minute.",
    quick_facts: &[
        "The 12 vertices encourage openness and receptivity.",
        "Linked to sacral energy & creative surrender.",
        "Guides reflections about trust, empathy, and release.",
        "Marine biologists note icosahedral symmetry in viral shells and microscopic plankton.",
        "Mystics pair it with lunar tides—journal when emotions feel tidal.",
    ],
};

const FIRE_DETAILS: ElementDetails = ElementDetails {
    name: "Fire",
    figure: "Tetrahedron",
    description: "Four faces rise into a single point, channeling breath upward like sparks leaping from flame.",
    nature_action: "Warm your palms near a flame or sunlight and notice the heat before journaling.",
    quick_facts: &[
        "Only Platonic solid that sits naturally on a base, ready to launch.",
        "Connected to solar plexus focus & courageous action.",
        "Use it to prompt momentum, willpower, and daring visions.",
        "NASA engineers love tetrahedral trusses for lightweight strength.",
        "Esoteric texts call it the alchemical “spark” that turns ideas to form.",
    ],
};

const AIR_DETAILS: ElementDetails = ElementDetails {
    name: "Air",
    figure: "Octahedron",
    description: "Twin pyramids join at the center, symbolizing balance between inhale and exhale, thought and expression.",
    nature_action: "Step outside, touch a tree if possible, and take three long, intentional breaths.",
    quick_facts: &[
        "Eight faces keep conversations circulating.",
        "Aligned with heart-space openness & listening.",
        "Invites journaling on clarity, language, and exchange.",
        "Crystallographers see octahedra inside diamonds and quartz.",
        "Symbolists say its dual pyramids channel breath between Earth and sky.",
    ],
};

const SPIRIT_DETAILS: ElementDetails = ElementDetails {
    name: "Spirit",
    figure: "Dodecahedron",
    description: "Twelve pentagons orbit a hidden center, hinting at the unseen layers that bind each element together.",
    nature_action: "Find a quiet view of the sky, close your eyes briefly, and notice any whispers of intuition.",
    quick_facts: &[
        "Considered a bridge to ether in sacred geometry.",
        "Pairs with crown chakra practices & stillness.",
        "Supports reflections on purpose, wonder, and unity.",
        "Astronomers model certain quasicrystals with dodecahedral symmetry.",
        "Plato linked it to the cosmos—use it when questions feel infinite.",
    ],
};

impl Element {
    /// Fixed, ordered journaling prompts for this element
    pub const fn prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Earth => EARTH_PROMPTS,
            Self::Water => WATER_PROMPTS,
            Self::Fire => FIRE_PROMPTS,
            Self::Air => AIR_PROMPTS,
            Self::Spirit => SPIRIT_PROMPTS,
        }
    }

    /// Pick a prompt uniformly at random
    pub fn random_prompt(&self) -> &'static str {
        self.random_prompt_with(&mut rand::thread_rng())
    }

    /// Pick a prompt uniformly at random using the given generator
    pub fn random_prompt_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        let prompts = self.prompts();
        // prompt tables are never empty
        prompts.choose(rng).copied().unwrap_or(prompts[0])
    }

    pub const fn color(&self) -> Color {
        match self {
            Self::Earth => Color(0x8b7355),
            Self::Water => Color(0x4a90a4),
            Self::Fire => Color(0xd4573f),
            Self::Air => Color(0x68f2c2),
            Self::Spirit => Color(0x48235f),
        }
    }

    pub const fn geometry(&self) -> GeometryDescriptor {
        match self {
            Self::Earth => GeometryDescriptor { shape: Polyhedron::Cube, size: 1.0 },
            Self::Water => GeometryDescriptor { shape: Polyhedron::Icosahedron, size: 0.6 },
            Self::Fire => GeometryDescriptor { shape: Polyhedron::Tetrahedron, size: 0.7 },
            Self::Air => GeometryDescriptor { shape: Polyhedron::Octahedron, size: 0.7 },
            Self::Spirit => GeometryDescriptor { shape: Polyhedron::Dodecahedron, size: 0.6 },
        }
    }

    pub const fn details(&self) -> &'static ElementDetails {
        match self {
            Self::Earth => &EARTH_DETAILS,
            Self::Water => &WATER_DETAILS,
            Self::Fire => &FIRE_DETAILS,
            Self::Air => &AIR_DETAILS,
            Self::Spirit => &SPIRIT_DETAILS,
        }
    }

    /// Short grounding exercise suggested before writing
    pub const fn nature_action(&self) -> &'static str {
        self.details().nature_action
    }
}
