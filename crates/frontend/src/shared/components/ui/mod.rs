pub mod checkbox;
pub mod input;
pub mod select;
pub mod textarea;

pub use checkbox::Checkbox;
pub use input::TextFilterInput;
pub use select::Select;
pub use textarea::Textarea;
