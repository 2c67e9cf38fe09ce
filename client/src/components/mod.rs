pub mod catalog_panel;
pub mod conversation_view;
pub mod prompt_bar;
