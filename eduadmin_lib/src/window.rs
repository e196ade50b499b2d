//! Pagination window computation for pager controls.
//!
//! Condenses a page range into the short strip a pager renders, e.g.
//! `1 .. 4 5 [6] 7 8 .. 42`. Pure functions over `(current, total_pages)`;
//! no controller state is involved.

/// One entry of a rendered pager strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page(i64),
    Ellipsis,
}

/// Computes the abbreviated page sequence for a pager control.
///
/// A page is shown when it is the first page, the last page, or within
/// two of the current page. A gap of exactly one page between two shown
/// pages is filled with that page; any wider gap collapses to a single
/// ellipsis. Out-of-range `current` values are clamped into
/// `[1, total_pages]`; a non-positive `total_pages` yields an empty strip.
pub fn page_window(current: i64, total_pages: i64) -> Vec<PageLink> {
    if total_pages <= 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let shown: Vec<i64> = (1..=total_pages)
        .filter(|&i| i == 1 || i == total_pages || (i - current).abs() <= 2)
        .collect();

    let mut links = Vec::with_capacity(shown.len() + 2);
    let mut prev: Option<i64> = None;
    for page in shown {
        match prev {
            Some(p) if page == p + 2 => {
                // A gap of exactly one page is filled, never collapsed.
                links.push(PageLink::Page(p + 1));
            }
            Some(p) if page > p + 2 => links.push(PageLink::Ellipsis),
            _ => {}
        }
        links.push(PageLink::Page(page));
        prev = Some(page);
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(links: &[PageLink]) -> String {
        links
            .iter()
            .map(|link| match link {
                PageLink::Page(n) => n.to_string(),
                PageLink::Ellipsis => "..".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn single_page() {
        assert_eq!(page_window(1, 1), vec![PageLink::Page(1)]);
    }

    #[test]
    fn no_pages() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn short_range_shows_everything() {
        assert_eq!(render(&page_window(2, 5)), "1 2 3 4 5");
    }

    #[test]
    fn middle_of_long_range() {
        assert_eq!(render(&page_window(6, 42)), "1 .. 4 5 6 7 8 .. 42");
    }

    #[test]
    fn near_start_has_no_left_ellipsis() {
        assert_eq!(render(&page_window(1, 10)), "1 2 3 .. 10");
        assert_eq!(render(&page_window(3, 10)), "1 2 3 4 5 .. 10");
    }

    #[test]
    fn near_end_has_no_right_ellipsis() {
        assert_eq!(render(&page_window(10, 10)), "1 .. 8 9 10");
        assert_eq!(render(&page_window(8, 10)), "1 .. 6 7 8 9 10");
    }

    #[test]
    fn one_page_gap_is_shown_not_collapsed() {
        // Page 2 sits alone between page 1 and the near-current run.
        assert_eq!(render(&page_window(5, 10)), "1 2 3 4 5 6 7 .. 10");
        assert_eq!(render(&page_window(6, 10)), "1 .. 4 5 6 7 8 9 10");
        assert_eq!(render(&page_window(5, 9)), "1 2 3 4 5 6 7 8 9");
    }

    #[test]
    fn current_out_of_range_is_clamped() {
        assert_eq!(render(&page_window(0, 5)), "1 2 3 4 5");
        assert_eq!(render(&page_window(99, 42)), "1 .. 38 39 40 41 42");
    }

    #[test]
    fn window_properties_hold_for_all_small_ranges() {
        for total in 1..=50i64 {
            for current in 1..=total {
                let links = page_window(current, total);

                let pages: Vec<i64> = links
                    .iter()
                    .filter_map(|l| match l {
                        PageLink::Page(n) => Some(*n),
                        PageLink::Ellipsis => None,
                    })
                    .collect();

                // First and last page always present.
                assert!(pages.contains(&1), "c={} t={}", current, total);
                assert!(pages.contains(&total), "c={} t={}", current, total);

                // Every shown page is an endpoint or near the current page.
                for &p in &pages {
                    assert!(
                        p == 1 || p == total || (p - current).abs() <= 2,
                        "page {} shown for c={} t={}",
                        p,
                        current,
                        total
                    );
                }

                // Pages appear in strictly increasing order.
                for pair in pages.windows(2) {
                    assert!(pair[0] < pair[1], "c={} t={}", current, total);
                }

                // No two adjacent ellipses, and every ellipsis stands for
                // at least two missing pages.
                for (i, link) in links.iter().enumerate() {
                    if *link == PageLink::Ellipsis {
                        assert!(i > 0 && i + 1 < links.len(), "c={} t={}", current, total);
                        let before = match links[i - 1] {
                            PageLink::Page(n) => n,
                            PageLink::Ellipsis => panic!("adjacent ellipses at c={} t={}", current, total),
                        };
                        let after = match links[i + 1] {
                            PageLink::Page(n) => n,
                            PageLink::Ellipsis => panic!("adjacent ellipses at c={} t={}", current, total),
                        };
                        assert!(
                            after - before > 2,
                            "ellipsis for a gap of {} at c={} t={}",
                            after - before - 1,
                            current,
                            total
                        );
                    }
                }
            }
        }
    }
}
