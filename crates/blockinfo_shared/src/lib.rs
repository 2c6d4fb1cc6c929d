pub mod block;
pub mod item;
pub mod kinds;
pub mod registry;
pub mod weapon;
