pub mod form_viewmodel;
pub mod listing_viewmodel;
pub mod refresh_coordinator;

pub use form_viewmodel::FormViewModel;
pub use listing_viewmodel::ListingViewModel;
pub use refresh_coordinator::RefreshCoordinator;
