// src/api/simple_pagination.rs
//! Numbered-page pagination driven by async closures.

use crate::error::AppError;

/// One fetched page and what the server reported about the listing.
#[derive(Debug, Clone)]
pub struct NumberedPage<T> {
    pub page_number: u32,
    pub total_pages: u32,
    pub items: Vec<T>,
}

/// Items of every page in page order.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Walks pages `1, 2, ...` until the server reports no further page.
///
/// Page `n + 1` is requested only while `n < total_pages`, with
/// `total_pages` read from page `n`. A listing of `K` pages is therefore
/// fetched exactly `K` times. `max_pages` caps the walk once the first page
/// has been seen.
pub async fn fetch_all_numbered_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<NumberedPage<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut page_number = 1u32;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch_fn(page_number).await?;
        pages_fetched += 1;

        if page.page_number != page_number {
            log::warn!(
                "Requested listing page {} but the server reported page {}",
                page_number,
                page.page_number
            );
        }

        all_items.extend(page.items);

        if page_number >= page.total_pages {
            break;
        }
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::warn!(
                    "Stopping after {} of {} listing page(s)",
                    pages_fetched,
                    page.total_pages
                );
                break;
            }
        }
        page_number += 1;
    }

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn listing(total_pages: u32, per_page: usize) -> impl Fn(u32) -> NumberedPage<String> {
        move |n| NumberedPage {
            page_number: n,
            total_pages,
            items: (0..per_page).map(|i| format!("{}-{}", n, i)).collect(),
        }
    }

    #[tokio::test]
    async fn test_fetches_exactly_total_pages() {
        for total in 1..=5u32 {
            let requested = RefCell::new(Vec::new());
            let make_page = listing(total, 2);
            let result = fetch_all_numbered_pages(
                |n| {
                    requested.borrow_mut().push(n);
                    let page = make_page(n);
                    async move { Ok(page) }
                },
                None,
            )
            .await
            .unwrap();

            assert_eq!(result.pages_fetched, total);
            assert_eq!(*requested.borrow(), (1..=total).collect::<Vec<_>>());
            assert_eq!(result.items.len(), total as usize * 2);
        }
    }

    #[tokio::test]
    async fn test_last_page_does_not_request_another() {
        let requested = RefCell::new(Vec::new());
        let result = fetch_all_numbered_pages(
            |n| {
                requested.borrow_mut().push(n);
                async move {
                    Ok(NumberedPage::<u32> {
                        page_number: n,
                        total_pages: 2,
                        items: vec![n],
                    })
                }
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(*requested.borrow(), vec![1, 2]);
        assert_eq!(result.items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_listing_terminates() {
        for total_pages in [0, 1] {
            let result = fetch_all_numbered_pages(
                |n| async move {
                    Ok(NumberedPage::<u32> {
                        page_number: n,
                        total_pages,
                        items: vec![],
                    })
                },
                None,
            )
            .await
            .unwrap();
            assert_eq!(result.pages_fetched, 1);
            assert!(result.items.is_empty());
        }
    }

    #[tokio::test]
    async fn test_stale_page_number_cannot_loop_forever() {
        let result = fetch_all_numbered_pages(
            |_| async move {
                Ok(NumberedPage::<u32> {
                    page_number: 1,
                    total_pages: 3,
                    items: vec![1],
                })
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(result.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_max_pages_caps_the_walk() {
        let result = fetch_all_numbered_pages(
            |n| async move {
                Ok(NumberedPage::<u32> {
                    page_number: n,
                    total_pages: 10,
                    items: vec![n],
                })
            },
            Some(3),
        )
        .await
        .unwrap();
        assert_eq!(result.pages_fetched, 3);
        assert_eq!(result.items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_zero_cap_still_reads_the_first_page() {
        let requested = RefCell::new(Vec::new());
        let result = fetch_all_numbered_pages(
            |n| {
                requested.borrow_mut().push(n);
                async move {
                    Ok(NumberedPage::<u32> {
                        page_number: n,
                        total_pages: 4,
                        items: vec![n],
                    })
                }
            },
            Some(0),
        )
        .await
        .unwrap();
        assert_eq!(*requested.borrow(), vec![1]);
        assert_eq!(result.items, vec![1]);
    }

    #[tokio::test]
    async fn test_cap_equal_to_total_reads_everything() {
        let result = fetch_all_numbered_pages(
            |n| async move {
                Ok(NumberedPage::<u32> {
                    page_number: n,
                    total_pages: 2,
                    items: vec![n],
                })
            },
            Some(2),
        )
        .await
        .unwrap();
        assert_eq!(result.pages_fetched, 2);
        assert_eq!(result.items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_error_aborts_the_walk() {
        let result = fetch_all_numbered_pages(
            |n| async move {
                if n == 2 {
                    return Err(AppError::MalformedResponse("page 2".to_string()));
                }
                Ok(NumberedPage::<u32> {
                    page_number: n,
                    total_pages: 3,
                    items: vec![n],
                })
            },
            None,
        )
        .await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
