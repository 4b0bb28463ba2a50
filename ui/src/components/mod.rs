//! Reusable UI components

pub mod chat_message;
pub mod donor_card;
pub mod donor_filters;
pub mod error_fallback;
pub mod loading;
pub mod navbar;
pub mod scroll_to_top;
pub mod setup_guide;

pub use chat_message::ChatMessage;
pub use donor_card::DonorCard;
pub use donor_filters::{DonorFilters, FilterSignals};
pub use error_fallback::ErrorFallback;
pub use loading::{LoadingDots, LoadingSpinner, TypingIndicator};
pub use navbar::NavBar;
pub use scroll_to_top::ScrollToTop;
pub use setup_guide::SetupGuide;
