pub mod food;
pub mod note;
pub mod photo;
pub mod pokemon;
pub mod todo;

pub use food::{FoodEntry, FoodPhotoResource, FoodReviewResource, FoodService};
pub use note::NoteResource;
pub use photo::PhotoResource;
pub use pokemon::PokemonReviewResource;
pub use todo::TodoResource;
