//! User-visible copy. The app ships in Spanish only.

pub const APP_TITLE: &str = "Palabra de Dios";
pub const APP_TAGLINE: &str = "Miel para tu alma";

pub const VERSES_UNAVAILABLE: &str =
    "No se pudieron cargar los versículos. Por favor, inténtelo de nuevo más tarde.";
pub const NO_VERSES_FOUND: &str = "No se encontraron versículos.";
pub const LOADING_VERSE: &str = "Cargando versículo...";

pub const SHOW_REFLECTION: &str = "Ver Reflexión";
pub const REFLECTION_TITLE: &str = "Reflexión";
pub const REFLECTION_GENERATING: &str = "Generando reflexión...";
pub const REFLECTION_NOT_CONFIGURED: &str =
    "Esta función necesita una configuración especial para estar disponible.";
pub const REFLECTION_UNAVAILABLE: &str =
    "No se pudo generar la reflexión. Por favor, inténtalo de nuevo.";
pub const BLESSING: &str = "Dios te Bendiga";

pub const PROMO_TITLE: &str = "¡Viste tu Fe!";
pub const PROMO_TAGLINE: &str = "Franelas con la palabra de Dios.";
pub const PROMO_CALL_TO_ACTION: &str = "Contáctanos";
pub const PROMO_GREETING: &str =
    "¡Hola! Me gustaría más información sobre las franelas, por favor.";
