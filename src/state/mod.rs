// ============================================================================
// STATE MODULE - Estado con Rc<RefCell> compartido entre vistas y viewmodels
// ============================================================================

pub mod app_state;
pub mod form_state;
pub mod listing_state;
pub mod refresh;

pub use app_state::*;
pub use form_state::*;
pub use listing_state::*;
pub use refresh::*;
