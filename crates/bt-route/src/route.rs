//! The `Route` — a fixed-length, ordered sequence of stops.

use crate::{RouteError, RoutePath, RouteResult, Stop, StopStatus};

/// Index of the unique `current` stop, or `None` if no stop is current (only
/// legal once every stop is `completed`).
///
/// O(n), side-effect free.
pub fn current_index(stops: &[Stop]) -> Option<usize> {
    stops.iter().position(|s| s.status == StopStatus::Current)
}

/// The stop immediately after the current one, or `None` when the current
/// stop is the last one or there is no current stop.
pub fn next_stop(stops: &[Stop]) -> Option<&Stop> {
    current_index(stops).and_then(|i| stops.get(i + 1))
}

/// An ordered, fixed-length sequence of stops plus the geometry connecting
/// them.
///
/// Order is traversal order and never changes.  Statuses and estimates on
/// the stops are mutable; the stop list itself is not resizable — only a
/// slice is ever handed out mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    stops: Vec<Stop>,
    path:  RoutePath,
}

impl Route {
    /// Build a route from `stops` with straight-line geometry between them.
    ///
    /// # Errors
    ///
    /// `Empty` for an empty list, `NonIncreasingId` if ids are not strictly
    /// increasing in traversal order.
    pub fn new(stops: Vec<Stop>) -> RouteResult<Self> {
        if stops.is_empty() {
            return Err(RouteError::Empty);
        }
        for pair in stops.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(RouteError::NonIncreasingId { prev: pair[0].id, next: pair[1].id });
            }
        }
        let path = RoutePath::straight(&stops);
        Ok(Self { stops, path })
    }

    /// Replace the straight-line geometry with a detailed `path`.
    pub fn with_path(mut self, path: RoutePath) -> RouteResult<Self> {
        if path.stop_count() != self.stops.len() {
            return Err(RouteError::Path(format!(
                "path maps {} stops but the route has {}",
                path.stop_count(),
                self.stops.len()
            )));
        }
        self.path = path;
        Ok(self)
    }

    #[inline]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Mutable access to the stops.  The length cannot change through a slice.
    #[inline]
    pub fn stops_mut(&mut self) -> &mut [Stop] {
        &mut self.stops
    }

    #[inline]
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    #[inline]
    pub fn stop(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always `false`: `Route::new` rejects empty lists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.stops.len() - 1
    }

    pub fn current_index(&self) -> Option<usize> {
        current_index(&self.stops)
    }

    pub fn current_stop(&self) -> Option<&Stop> {
        self.current_index().map(|i| &self.stops[i])
    }

    pub fn next_stop(&self) -> Option<&Stop> {
        next_stop(&self.stops)
    }

    /// `true` once every stop is `completed`.
    pub fn is_complete(&self) -> bool {
        self.stops.iter().all(|s| s.status == StopStatus::Completed)
    }

    /// Preset statuses for a vehicle sitting at `start`: earlier stops become
    /// `completed`, `start` becomes `current`, later stops `upcoming`.
    ///
    /// Estimates on later stops are left as they are; arrival times on later
    /// stops are cleared.
    pub fn preset(&mut self, start: usize) -> RouteResult<()> {
        if start >= self.stops.len() {
            return Err(RouteError::IndexOutOfRange { index: start, len: self.stops.len() });
        }
        for (i, stop) in self.stops.iter_mut().enumerate() {
            match i.cmp(&start) {
                std::cmp::Ordering::Less    => stop.mark_passed(),
                std::cmp::Ordering::Equal   => {
                    stop.mark_current();
                    stop.arrival_time = None;
                }
                std::cmp::Ordering::Greater => stop.mark_upcoming(),
            }
        }
        Ok(())
    }

    /// Check the statuses a caller supplied and return the current index.
    ///
    /// # Errors
    ///
    /// `NoCurrentStop`, `MultipleCurrentStops`, or `StatusOrder` when a stop
    /// before the current one is not `completed` (or one after it is not
    /// `upcoming`).
    pub fn validate_statuses(&self) -> RouteResult<usize> {
        let count = self.stops.iter().filter(|s| s.status == StopStatus::Current).count();
        let current = match count {
            0 => return Err(RouteError::NoCurrentStop),
            1 => self.current_index().ok_or(RouteError::NoCurrentStop)?,
            _ => return Err(RouteError::MultipleCurrentStops { count }),
        };
        for (index, stop) in self.stops.iter().enumerate() {
            let expected = match index.cmp(&current) {
                std::cmp::Ordering::Less    => StopStatus::Completed,
                std::cmp::Ordering::Equal   => StopStatus::Current,
                std::cmp::Ordering::Greater => StopStatus::Upcoming,
            };
            if stop.status != expected {
                return Err(RouteError::StatusOrder { index, status: stop.status, current });
            }
        }
        Ok(current)
    }

    /// Drop estimates that only make sense on `upcoming` stops, and arrival
    /// times on stops not yet `completed`.
    pub fn normalise(&mut self) {
        for stop in &mut self.stops {
            if stop.status != StopStatus::Upcoming {
                stop.eta = None;
                stop.estimated_arrival_time = None;
            }
            if stop.status != StopStatus::Completed {
                stop.arrival_time = None;
            }
        }
    }

    /// The status invariant: either the shape `validate_statuses` accepts, or
    /// every stop `completed`.
    pub fn status_invariant_holds(&self) -> bool {
        self.is_complete() || self.validate_statuses().is_ok()
    }
}
