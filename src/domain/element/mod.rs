//! Element domain module

mod catalog;
mod tag;

pub use catalog::{Color, ElementDetails, GeometryDescriptor, Polyhedron};
pub use tag::{is_valid_element, Element, ALL_ELEMENTS};
