//! Mapping of source items (images or text blocks) onto output slots
//!
//! Images and text are distributed independently against the same slot
//! count. When the counts differ, a duplicated image can end up next to an
//! unrelated text duplicate; this pairing is kept as-is.

/// Spread `item_count` items over `total_slots` slots.
///
/// With fewer items than slots every item is repeated
/// `total_slots / item_count` times and the first `total_slots % item_count`
/// items get one extra copy. Copies are grouped: all slots of item 0 come
/// first, then item 1, and so on. With more items than slots the first
/// `total_slots` items are used once and the rest are dropped.
pub fn create_distribution(item_count: usize, total_slots: usize) -> Vec<usize> {
    if item_count == 0 {
        return Vec::new();
    }

    if item_count > total_slots {
        warn_unused("items", item_count, total_slots);
        return (0..total_slots).collect();
    }

    let base = total_slots / item_count;
    let extra = total_slots % item_count;

    let mut slots = Vec::with_capacity(total_slots);
    for item in 0..item_count {
        let copies = if item < extra { base + 1 } else { base };
        slots.extend(std::iter::repeat_n(item, copies));
    }
    slots
}

/// Number of items that get no slot at all
pub fn unused_items(item_count: usize, total_slots: usize) -> usize {
    item_count.saturating_sub(total_slots)
}

fn warn_unused(kind: &str, item_count: usize, total_slots: usize) {
    let unused = unused_items(item_count, total_slots);
    if unused > 0 {
        log::warn!(
            "{} {} for {} slots, {} left unused",
            item_count,
            kind,
            total_slots,
            unused
        );
    }
}

/// One slot per item, no duplication
pub fn identity_distribution(item_count: usize) -> Vec<usize> {
    (0..item_count).collect()
}

/// Number of slots to render.
///
/// With images: whole pages of repeats when duplicating, otherwise one slot
/// per image. Without images the sheet is a text-only or blank template of at
/// least one full page.
pub fn slot_count(
    image_count: usize,
    text_count: usize,
    circles_per_page: usize,
    duplicate: bool,
) -> usize {
    if image_count == 0 {
        return text_count.max(circles_per_page);
    }

    if duplicate && circles_per_page > 0 {
        image_count.div_ceil(circles_per_page) * circles_per_page
    } else {
        image_count
    }
}

/// Image and text source for every slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotAssignment {
    pub image_index: Vec<Option<usize>>,
    pub text_index: Vec<Option<usize>>,
}

impl SlotAssignment {
    pub fn len(&self) -> usize {
        self.image_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_index.is_empty()
    }

    pub fn image_for(&self, slot: usize) -> Option<usize> {
        self.image_index.get(slot).copied().flatten()
    }

    pub fn text_for(&self, slot: usize) -> Option<usize> {
        self.text_index.get(slot).copied().flatten()
    }
}

/// Resolve the image and text source of each of `total_slots` slots.
pub fn assign_slots(
    image_count: usize,
    text_count: usize,
    total_slots: usize,
    duplicate: bool,
) -> SlotAssignment {
    let images = if duplicate {
        create_distribution(image_count, total_slots)
    } else {
        warn_unused("images", image_count, total_slots);
        identity_distribution(image_count.min(total_slots))
    };

    let texts = if text_count == 1 {
        vec![0; total_slots]
    } else if duplicate {
        create_distribution(text_count, total_slots)
    } else {
        warn_unused("text blocks", text_count, total_slots);
        identity_distribution(text_count.min(total_slots))
    };

    SlotAssignment {
        image_index: pad_to(images, total_slots),
        text_index: pad_to(texts, total_slots),
    }
}

fn pad_to(indices: Vec<usize>, total_slots: usize) -> Vec<Option<usize>> {
    let mut slots: Vec<Option<usize>> = indices.into_iter().map(Some).collect();
    slots.resize(total_slots, None);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_items_twenty_slots() {
        assert_eq!(
            create_distribution(3, 20),
            vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2]
        );
    }

    #[test]
    fn test_even_split() {
        assert_eq!(create_distribution(2, 4), vec![0, 0, 1, 1]);
        assert_eq!(create_distribution(4, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_more_items_than_slots() {
        assert_eq!(create_distribution(7, 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_items() {
        assert!(create_distribution(0, 20).is_empty());
    }

    #[test]
    fn test_slot_count_rules() {
        // Images without duplication: one slot each
        assert_eq!(slot_count(25, 0, 20, false), 25);
        // Images with duplication: whole pages
        assert_eq!(slot_count(3, 0, 20, true), 20);
        assert_eq!(slot_count(25, 0, 20, true), 40);
        // No images: at least a page, more if there is more text
        assert_eq!(slot_count(0, 0, 20, false), 20);
        assert_eq!(slot_count(0, 3, 20, true), 20);
        assert_eq!(slot_count(0, 30, 20, false), 30);
        assert_eq!(slot_count(0, 30, 20, true), 30);
    }

    #[test]
    fn test_single_text_block_applies_everywhere() {
        let assignment = assign_slots(2, 1, 4, false);
        assert_eq!(assignment.text_index, vec![Some(0); 4]);
        assert_eq!(
            assignment.image_index,
            vec![Some(0), Some(1), None, None]
        );
    }

    #[test]
    fn test_independent_distributions() {
        let assignment = assign_slots(2, 3, 6, true);
        assert_eq!(
            assignment.image_index,
            vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)]
        );
        assert_eq!(
            assignment.text_index,
            vec![Some(0), Some(0), Some(1), Some(1), Some(2), Some(2)]
        );
    }

    #[test]
    fn test_text_without_duplicate_leaves_blanks() {
        let assignment = assign_slots(0, 3, 5, false);
        assert_eq!(
            assignment.text_index,
            vec![Some(0), Some(1), Some(2), None, None]
        );
        assert!(assignment.image_index.iter().all(Option::is_none));
        assert_eq!(assignment.text_for(4), None);
        assert_eq!(assignment.image_for(10), None);
    }

    #[test]
    fn test_surplus_text_without_duplicate_is_dropped() {
        assert_eq!(unused_items(5, 3), 2);
        assert_eq!(unused_items(3, 5), 0);

        let assignment = assign_slots(3, 5, 3, false);
        assert_eq!(assignment.text_index, vec![Some(0), Some(1), Some(2)]);
    }
}
