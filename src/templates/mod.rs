// Page templates; fragments live in crate::render
pub mod panel_template;
pub mod confirmation_template;

pub use panel_template::{NavItem, PanelTemplate};
pub use confirmation_template::{ConfirmCheckbox, ConfirmationTemplate};
