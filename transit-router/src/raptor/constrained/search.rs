//! Boarding search honoring constrained transfers.

use super::{BoardOrAlightEvent, DEFAULT_SEARCH_WINDOW_SECONDS, SearchDirection, TransfersByStopPosition};
use crate::domain::StopIndex;
use crate::raptor::{MergedTimetable, TripScheduleWithOffset};
use crate::transfer::{ConstrainedTransfer, TransferConstraint, TransferPriority, TripStop};

/// Finds the trip to board on one pattern when arriving from a given trip.
///
/// One instance serves one (direction, pattern) pair. It holds no search
/// state, so the same instance may be used for any number of lookups.
#[derive(Debug, Clone, Copy)]
pub struct ConstrainedBoardingSearch<'a> {
    direction: SearchDirection,
    transfers: Option<&'a TransfersByStopPosition>,
    search_window: i32,
}

impl<'a> ConstrainedBoardingSearch<'a> {
    pub fn new(
        direction: SearchDirection,
        transfers: Option<&'a TransfersByStopPosition>,
        search_window: i32,
    ) -> Self {
        Self {
            direction,
            transfers,
            search_window,
        }
    }

    /// A search that never finds a constrained transfer.
    pub fn disabled(direction: SearchDirection) -> Self {
        Self::new(direction, None, DEFAULT_SEARCH_WINDOW_SECONDS)
    }

    /// True if any constrained transfer targets this pattern at `stop_pos`.
    pub fn transfer_exist(&self, stop_pos: usize) -> bool {
        self.transfers.and_then(|t| t.at(stop_pos)).is_some()
    }

    /// Find the target trip to board at `target_stop_pos` when leaving
    /// `source_trip` at `source_stop_index` at `source_time`.
    ///
    /// Trips are scanned in search order from `source_time`. The first
    /// transfer, most specific first, whose target matches a trip decides:
    /// a not-allowed transfer to that specific trip moves on to the next trip,
    /// which is then boarded as a regular transfer if it respects
    /// `earliest_board_time`. Guaranteed and stay-seated transfers board the
    /// trip at once; any other transfer boards it only if it respects
    /// `earliest_board_time`. A not-allowed transfer to all trips yields a
    /// [`TransferConstraint::NotAllowed`] event.
    ///
    /// Returns `None` if no transfer applies to the source trip, or no trip
    /// is found within the search window. The caller then falls back to
    /// ordinary boarding.
    pub fn find<'t>(
        &self,
        timetable: &'t MergedTimetable,
        target_stop_pos: usize,
        source_trip: &TripScheduleWithOffset<'_>,
        source_stop_index: StopIndex,
        source_time: i32,
        earliest_board_time: i32,
    ) -> Option<BoardOrAlightEvent<'t>> {
        let dir = self.direction;
        let transfers = self.transfers?.at(target_stop_pos)?;

        let source_pos = dir.source_stop_position(source_trip, source_time, source_stop_index)?;
        let source = TripStop {
            trip: source_trip.trip_id(),
            route: source_trip.route(),
            stop: source_stop_index,
            stop_position: source_pos,
        };
        let applies = |t: &ConstrainedTransfer| dir.source_point(t).matches(&source);
        if !transfers.iter().any(|t| applies(t)) {
            return None;
        }

        let window_end = dir.plus(source_time, self.search_window);
        let target_stop = timetable.stop_index(target_stop_pos);
        let mut board_next_normal_trip = false;

        for index in dir.trip_indices(timetable.number_of_trip_schedules()) {
            let trip = timetable.trip_schedule(index);
            let time = dir.time(&trip, target_stop_pos);

            if dir.is_before(time, source_time) {
                continue;
            }
            if dir.is_before(window_end, time) {
                return None;
            }

            let event = |transfer: Option<&ConstrainedTransfer>| BoardOrAlightEvent {
                trip_index: index,
                trip,
                stop_position_in_pattern: target_stop_pos,
                stop_index: target_stop,
                time,
                earliest_board_time,
                constraint: transfer.map_or(TransferConstraint::Regular, |t| t.constraint()),
                transfer_id: transfer.map(|t| t.id()),
                priority: transfer.map_or_else(TransferPriority::default, |t| t.priority()),
            };
            let respects_slack = !dir.is_before(time, earliest_board_time);

            let decision = transfers
                .iter()
                .filter(|t| applies(t))
                .find(|t| dir.target_point(t).matches_trip(trip.trip_id(), trip.route()));

            match decision {
                Some(tx) => {
                    let specific = !dir.target_point(tx).applies_to_all_trips();
                    if tx.constraint().is_not_allowed() && specific {
                        board_next_normal_trip = true;
                        continue;
                    }
                    if !tx.constraint().is_facilitated() && !respects_slack {
                        continue;
                    }
                    return Some(event(Some(tx.as_ref())));
                }
                None if board_next_normal_trip && respects_slack => {
                    return Some(event(None));
                }
                None => {}
            }
        }

        None
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{
        PatternId, SECONDS_PER_DAY, TransferId, TransitMode, TripId, format_service_time,
    };
    use crate::raptor::constrained::ConstrainedTransferIndex;
    use crate::test_support::{TestRoute, date};
    use crate::transfer::{TransferPoint, TransferService};

    use proptest::prelude::*;

    const HEADWAY: i32 = 600;

    /// Feeder route 1 (stops 0, 1) with one trip arriving at stop 1 at
    /// 08:00, and route 2 (stops 1, 2) with `n` trips leaving stop 1 every
    /// ten minutes from 08:00.
    fn routes(n: usize) -> (TestRoute, TestRoute) {
        let feeder = TestRoute::new(1, TransitMode::Bus, &[0, 1]).with_trip(1, "07:50 08:00");
        let mut connecting = TestRoute::new(2, TransitMode::Bus, &[1, 2]);
        for i in 0..n {
            let dep = 8 * 3600 + i as i32 * HEADWAY;
            let schedule = format!("{} {}", format_service_time(dep), format_service_time(dep + 300));
            connecting = connecting.with_trip(100 + i as u32, &schedule);
        }
        (feeder, connecting)
    }

    fn feeder_point() -> TransferPoint {
        TransferPoint::Trip {
            trip: TripId(1),
            stop_position: 1,
        }
    }

    fn target_point(k: usize) -> TransferPoint {
        TransferPoint::Trip {
            trip: TripId(100 + k as u32),
            stop_position: 0,
        }
    }

    fn search_forward(
        feeder: &TestRoute,
        connecting: &TestRoute,
        constraint: TransferConstraint,
        k: usize,
        window: i32,
    ) -> Option<(usize, TransferConstraint)> {
        let tt1 = feeder.timetable(date(2024, 1, 1));
        let tt2 = connecting.timetable(date(2024, 1, 1));
        let service: TransferService = [ConstrainedTransfer::new(
            TransferId(1),
            feeder_point(),
            target_point(k),
            constraint,
        )]
        .into_iter()
        .collect();
        let index = ConstrainedTransferIndex::generate(&service, &[tt1.clone(), tt2.clone()]);
        let subject =
            ConstrainedBoardingSearch::new(SearchDirection::Forward, index.forward_search(PatternId(2)), window);

        let source = tt1.trip_schedule(0);
        let arrival = source.arrival(1);
        subject
            .find(&tt2, 0, &source, StopIndex(1), arrival, arrival)
            .map(|e| (e.trip_index, e.constraint))
    }

    proptest! {
        #[test]
        fn forbidden_trip_is_skipped(n in 1usize..8, k in 0usize..8) {
            let k = k % n;
            let (feeder, connecting) = routes(n);

            let found = search_forward(
                &feeder,
                &connecting,
                TransferConstraint::NotAllowed,
                k,
                DEFAULT_SEARCH_WINDOW_SECONDS,
            );

            if k + 1 < n {
                prop_assert_eq!(found, Some((k + 1, TransferConstraint::Regular)));
            } else {
                prop_assert_eq!(found, None);
            }
        }

        #[test]
        fn guaranteed_within_window_is_found(n in 1usize..8, k in 0usize..8, slack in 0i32..600) {
            let k = k % n;
            let (feeder, connecting) = routes(n);
            let window = k as i32 * HEADWAY + slack;

            let found = search_forward(
                &feeder,
                &connecting,
                TransferConstraint::Guaranteed,
                k,
                window,
            );
            prop_assert_eq!(found, Some((k, TransferConstraint::Guaranteed)));
        }

        #[test]
        fn guaranteed_overnight_connection_is_found(
            arrival_minute in (22 * 60)..(24 * 60),
            gap_minutes in 0i32..(6 * 60),
        ) {
            let arrival = arrival_minute * 60;
            let departure = arrival + gap_minutes * 60;
            let local_departure = departure % SECONDS_PER_DAY;
            let feeder = TestRoute::new(1, TransitMode::Rail, &[0, 1]).with_trip(1, &format!(
                "{} {}", format_service_time(arrival - 600), format_service_time(arrival)
            ));
            let night = TestRoute::new(2, TransitMode::Bus, &[1, 2]).with_trip(2, &format!(
                "{} {}", format_service_time(local_departure), format_service_time(local_departure + 300)
            ));
            let tt1 = feeder.timetable_for_days(date(2024, 1, 1), 2);
            let tt2 = night.timetable_for_days(date(2024, 1, 1), 2);
            let service: TransferService = [ConstrainedTransfer::new(
                TransferId(1),
                feeder_point(),
                TransferPoint::Trip { trip: TripId(2), stop_position: 0 },
                TransferConstraint::Guaranteed,
            )]
            .into_iter()
            .collect();
            let index = ConstrainedTransferIndex::generate(&service, &[tt1.clone(), tt2.clone()]);
            let expected = usize::from(departure >= SECONDS_PER_DAY);

            let forward = ConstrainedBoardingSearch::new(
                SearchDirection::Forward,
                index.forward_search(PatternId(2)),
                DEFAULT_SEARCH_WINDOW_SECONDS,
            );
            let from = tt1.trip_schedule(0);
            let boarded = forward
                .find(&tt2, 0, &from, StopIndex(1), arrival, arrival)
                .map(|e| (e.trip_index, e.time));
            prop_assert_eq!(boarded, Some((expected, departure)));

            let reverse = ConstrainedBoardingSearch::new(
                SearchDirection::Reverse,
                index.reverse_search(PatternId(1)),
                DEFAULT_SEARCH_WINDOW_SECONDS,
            );
            let to = tt2.trip_schedule(expected);
            let alighted = reverse
                .find(&tt1, 1, &to, StopIndex(1), departure, departure)
                .map(|e| (e.trip_index, e.time));
            prop_assert_eq!(alighted, Some((0, arrival)));
        }

        #[test]
        fn forward_and_reverse_agree(a in 0usize..6, gap in 0usize..5) {
            // Route 1 trips arrive at stop 1 hourly at :10, route 2 trips
            // leave it hourly at :30
            let b = a + gap;
            let mut r1 = TestRoute::new(1, TransitMode::Rail, &[0, 1]);
            let mut r2 = TestRoute::new(2, TransitMode::Rail, &[1, 2]);
            for i in 0..12i32 {
                let arr = 6 * 3600 + i * 3600 + 600;
                let dep = 6 * 3600 + i * 3600 + 1800;
                r1 = r1.with_trip(10 + i as u32, &format!(
                    "{} {}", format_service_time(arr - 300), format_service_time(arr)
                ));
                r2 = r2.with_trip(50 + i as u32, &format!(
                    "{} {}", format_service_time(dep), format_service_time(dep + 300)
                ));
            }
            let tt1 = r1.timetable(date(2024, 1, 1));
            let tt2 = r2.timetable(date(2024, 1, 1));
            let service: TransferService = [ConstrainedTransfer::new(
                TransferId(1),
                TransferPoint::Trip { trip: TripId(10 + a as u32), stop_position: 1 },
                TransferPoint::Trip { trip: TripId(50 + b as u32), stop_position: 0 },
                TransferConstraint::Guaranteed,
            )]
            .into_iter()
            .collect();
            let index = ConstrainedTransferIndex::generate(&service, &[tt1.clone(), tt2.clone()]);

            let forward = ConstrainedBoardingSearch::new(
                SearchDirection::Forward,
                index.forward_search(PatternId(2)),
                DEFAULT_SEARCH_WINDOW_SECONDS,
            );
            let from = tt1.trip_schedule(a);
            let arrival = from.arrival(1);
            let boarded = forward
                .find(&tt2, 0, &from, StopIndex(1), arrival, arrival)
                .map(|e| e.trip_index);
            prop_assert_eq!(boarded, Some(b));

            let reverse = ConstrainedBoardingSearch::new(
                SearchDirection::Reverse,
                index.reverse_search(PatternId(1)),
                DEFAULT_SEARCH_WINDOW_SECONDS,
            );
            let to = tt2.trip_schedule(b);
            let departure = to.departure(0);
            let alighted = reverse
                .find(&tt1, 1, &to, StopIndex(1), departure, departure)
                .map(|e| e.trip_index);
            prop_assert_eq!(alighted, Some(a));
        }
    }
}
