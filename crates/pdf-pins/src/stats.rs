use crate::distribute::{assign_slots, slot_count};
use crate::options::PinOptions;
use crate::types::*;
use std::collections::HashSet;

/// Calculate statistics for a sheet without rendering it
pub fn calculate_statistics(image_count: usize, options: &PinOptions) -> SheetStatistics {
    let profile = options.profile();
    let per_page = profile.circles_per_page;
    let text_count = options.text_blocks.len();

    let total_slots = slot_count(image_count, text_count, per_page, options.duplicate);
    let assignment = assign_slots(image_count, text_count, total_slots, options.duplicate);

    let pages = total_slots.div_ceil(per_page.max(1));
    let circles_on_last_page = match total_slots % per_page.max(1) {
        0 if total_slots > 0 => per_page,
        rest => rest,
    };

    let images_used: HashSet<usize> = assignment.image_index.iter().flatten().copied().collect();
    let texts_used: HashSet<usize> = assignment.text_index.iter().flatten().copied().collect();
    let blank_slots = assignment.image_index.iter().filter(|slot| slot.is_none()).count();

    SheetStatistics {
        pin_size: options.size,
        circles_per_page: per_page,
        total_slots,
        pages,
        circles_on_last_page,
        images_used: images_used.len(),
        text_blocks_used: texts_used.len(),
        blank_slots,
    }
}
