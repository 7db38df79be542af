use pdf_pins::*;

#[test]
fn test_empty_layout() {
    for size in PinSize::ALL {
        let positions = calculate_layout(0, &size.profile());
        assert!(positions.is_empty());
        assert_eq!(get_total_pages(&positions), 0);
    }
}

#[test]
fn test_single_page_when_within_capacity() {
    for size in PinSize::ALL {
        let profile = size.profile();
        for n in 1..=profile.circles_per_page {
            let positions = calculate_layout(n, &profile);
            assert_eq!(positions.len(), n);
            assert!(positions.iter().all(|p| p.page == 0));
            assert_eq!(get_total_pages(&positions), 1);
        }
    }
}

#[test]
fn test_pages_hold_full_count_then_remainder() {
    let profile = PinSize::Small.profile();
    let positions = calculate_layout(25, &profile);

    assert_eq!(get_total_pages(&positions), 2);
    assert_eq!(positions.iter().filter(|p| p.page == 0).count(), 20);
    assert_eq!(positions.iter().filter(|p| p.page == 1).count(), 5);

    let profile = PinSize::Large.profile();
    let positions = calculate_layout(6 * 3 + 2, &profile);
    assert_eq!(get_total_pages(&positions), 4);
    for page in 0..3 {
        assert_eq!(positions.iter().filter(|p| p.page == page).count(), 6);
    }
    assert_eq!(positions.iter().filter(|p| p.page == 3).count(), 2);
}

#[test]
fn test_circles_do_not_overlap() {
    for size in PinSize::ALL {
        let profile = size.profile();
        let positions = calculate_layout(profile.circles_per_page * 2 + 1, &profile);

        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1).filter(|b| b.page == a.page) {
                assert!(
                    a.distance_to(b) >= profile.circle_diameter_pt - 0.001,
                    "{:?} and {:?} overlap",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_circles_stay_inside_margins() {
    let page = PageGeometry::a4();
    for size in PinSize::ALL {
        let profile = size.profile();
        let r = profile.circle_radius_pt();
        for p in calculate_layout(profile.circles_per_page, &profile) {
            assert!(p.x - r >= page.margin_pt - 0.001);
            assert!(p.x + r <= page.page_width_pt - page.margin_pt + 0.001);
            assert!(p.y - r >= page.margin_pt - 0.001);
            assert!(p.y + r <= page.page_height_pt - page.margin_pt + 0.001);
        }
    }
}
