pub mod authors;
pub mod books;
pub mod genres;
pub mod instances;
pub mod reconciler;
pub mod tags;
pub mod views;
pub mod visit_counter;
