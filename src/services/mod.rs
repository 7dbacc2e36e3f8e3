pub mod categorizer;
pub mod palette;
pub mod providers;
pub mod recommendations;
pub mod repository;
pub mod similarity;
pub mod studio;
