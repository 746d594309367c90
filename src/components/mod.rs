pub mod card_display;
pub mod card_panel;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_display::{CardDisplay, CardDisplayProps};
pub use card_panel::{CardPanel, CardPanelProps, PanelBackground};
pub use search_bar::{SearchBar, SearchBarProps};
