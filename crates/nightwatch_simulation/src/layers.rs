//! Layer Constants
//!
//! Битовые маски слоёв мира - centralised constants для всего проекта.
//!
//! ## Архитектура:
//! - **Layer:** на каком слое находится объект (body или occluder)
//! - **Mask:** какие слои учитывает запрос (nearby / occlusion / raycast)
//!
//! ## Использование:
//! ```rust
//! use nightwatch_simulation::layers::*;
//!
//! // Кто блокирует обнаружение (sampled LOS)
//! let occluders = MASK_VISION_OCCLUDERS;
//! assert_eq!(occluders & LAYER_PARTY, 0);
//! ```

/// Layer 1: Party (игровые персонажи - цели обнаружения)
pub const LAYER_PARTY: u32 = 0b1;

/// Layer 2: Walls + furniture (статическая геометрия)
pub const LAYER_WALLS: u32 = 0b10;

/// Layer 3: Big objects (крупные предметы - блокируют обнаружение, но не confirm-луч)
pub const LAYER_BIG_OBJECTS: u32 = 0b100;

/// Layer 4: Enemies (guards, sentries - получатели alarm broadcast)
pub const LAYER_ENEMIES: u32 = 0b1000;

/// Mask: что блокирует sampled-segment LOS при обнаружении
pub const MASK_VISION_OCCLUDERS: u32 = LAYER_WALLS | LAYER_BIG_OBJECTS;

/// Mask: single-ray confirmation (стены + сами цели)
///
/// Луч считается успешным если ничего не задел ИЛИ задел саму цель.
pub const MASK_SIGHT_RAY: u32 = LAYER_WALLS | LAYER_PARTY;

/// Mask: кого задевает contact damage
pub const MASK_CONTACT: u32 = LAYER_PARTY;
