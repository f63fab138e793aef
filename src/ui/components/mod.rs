pub mod chat_area;
pub mod input_bar;
pub mod typing_indicator;
