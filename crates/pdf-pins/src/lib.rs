pub mod color;
pub mod constants;
pub mod distribute;
mod generate;
pub mod io;
pub mod layout;
mod options;
pub mod render;
mod stats;
pub mod transform;
mod types;

pub use color::{parse_color, parse_optional_color};
pub use distribute::{SlotAssignment, assign_slots, create_distribution, slot_count};
pub use generate::{generate, generate_pdf, generate_pdf_bytes};
pub use io::{load_image, load_images, load_text_blocks_from_csv, save_pdf};
pub use layout::{CirclePosition, calculate_layout, get_total_pages};
pub use options::*;
pub use stats::calculate_statistics;
pub use transform::{PinImage, PreparedImage, prepare};
pub use types::*;
