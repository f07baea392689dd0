pub mod chat_loop;
pub mod renderer;
pub mod screen;
pub mod theme;
pub mod wrap;
