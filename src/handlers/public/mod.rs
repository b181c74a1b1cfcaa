// handlers/public/mod.rs - Public handlers (no authentication)
//
// The label feed is read by embedded display devices that carry no
// credentials.
pub mod etiquetas;
pub mod health;

pub use etiquetas::list as etiquetas_list;
pub use health::get as health_get;
