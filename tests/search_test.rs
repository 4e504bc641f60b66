use chrono::Datelike;

use farelink::date::{today, PartialDate};
use farelink::error::SearchError;
use farelink::search::{itinerary, roundtrip};

fn assert_url(actual: &str, fragment: &str) {
    assert_eq!(
        actual,
        format!("https://www.google.com/flights/?f=0&gl=us#{fragment}")
    );
}

fn no_date() -> PartialDate {
    PartialDate::default()
}

#[test]
fn roundtrip_without_dates() {
    let search = roundtrip()
        .departing(["JFK"], no_date())
        .returning(["JNB"], no_date());
    assert_url(&search.url(), "search;f=JFK;t=JNB");
}

#[test]
fn roundtrip_multiple_airports() {
    let search = roundtrip()
        .departing(["JFK", "EWR", "LGA", "SWF"], no_date())
        .returning(["JNB", "CPT"], no_date());
    assert_url(&search.url(), "search;f=JFK,EWR,LGA,SWF;t=JNB,CPT");
}

#[test]
fn roundtrip_with_both_dates() {
    let search = roundtrip()
        .departing(["JFK"], PartialDate::ymd(2026, 9, 6))
        .returning(["JNB"], PartialDate::ymd(2026, 10, 12));
    assert_url(&search.url(), "search;f=JFK;t=JNB;d=2026-09-06;r=2026-10-12");
}

#[test]
fn roundtrip_with_departure_date_only() {
    let search = roundtrip()
        .departing(["JFK"], PartialDate::ymd(2026, 9, 6))
        .returning(["JNB"], no_date());
    assert_url(&search.url(), "search;f=JFK;t=JNB;d=2026-09-06");
}

#[test]
fn roundtrip_with_return_date_only() {
    let search = roundtrip()
        .departing(["JFK"], no_date())
        .returning(["JNB"], PartialDate::ymd(2026, 9, 6));
    assert_url(&search.url(), "search;f=JFK;t=JNB;r=2026-09-06");
}

#[test]
fn roundtrip_returning_may_come_first() {
    let search = roundtrip()
        .returning(["JNB"], no_date())
        .departing(["JFK"], no_date());
    assert_url(&search.url(), "search;f=JFK;t=JNB");
}

#[test]
fn empty_roundtrip_still_builds_a_url() {
    assert_url(&roundtrip().url(), "search;f=;t=");
}

#[test]
fn roundtrip_defaults_open_date_components_to_today() {
    let today = today();
    let search = roundtrip()
        .departing(["JFK"], PartialDate::day(6))
        .returning(["JNB"], no_date());
    assert_url(
        &search.url(),
        &format!(
            "search;f=JFK;t=JNB;d={:04}-{:02}-06",
            today.year(),
            today.month()
        ),
    );
}

#[test]
fn roundtrip_mutators_leave_the_original_alone() {
    let base = roundtrip().departing(["JFK"], no_date());
    let before = base.url();
    let _derived = base.returning(["JNB"], PartialDate::ymd(2026, 10, 12));
    assert_eq!(base.url(), before);
}

#[test]
fn itinerary_splits_legs_on_departing_after_complete() {
    let search = itinerary()
        .departing(["JFK", "EWR"], no_date())
        .arriving(["JNB"])
        .departing(["JNB"], no_date())
        .arriving(["JFK", "EWR"]);
    assert_url(
        &search.url().unwrap(),
        "search;iti=JFK,EWR_JNB_*JNB_JFK,EWR_;tt=m",
    );
}

#[test]
fn itinerary_with_dates() {
    let search = itinerary()
        .departing(["JFK"], PartialDate::ymd(2026, 9, 5))
        .arriving(["JNB"])
        .departing(["CPT"], PartialDate::ymd(2026, 9, 9))
        .arriving(["JFK", "EWR"]);
    assert_url(
        &search.url().unwrap(),
        "search;iti=JFK_JNB_2026-09-05*CPT_JFK,EWR_2026-09-09;tt=m",
    );
}

#[test]
fn itinerary_with_a_single_open_leg() {
    let search = itinerary().departing(["JFK"], no_date());
    assert_url(&search.url().unwrap(), "search;iti=JFK__;tt=m");
}

#[test]
fn itinerary_departing_twice_amends_the_open_leg() {
    let search = itinerary()
        .departing(["JFK"], no_date())
        .departing(["EWR"], no_date())
        .arriving(["JNB"]);
    assert_url(&search.url().unwrap(), "search;iti=EWR_JNB_;tt=m");
}

#[test]
fn itinerary_arriving_twice_amends_the_last_leg() {
    let search = itinerary()
        .departing(["JFK"], no_date())
        .arriving(["JNB"])
        .arriving(["CPT"]);
    assert_url(&search.url().unwrap(), "search;iti=JFK_CPT_;tt=m");
}

#[test]
fn itinerary_cannot_skip_departure() {
    let so_far_so_good = itinerary().arriving(["JFK"]);
    match so_far_so_good.url() {
        Err(SearchError::Incomplete { message, .. }) => {
            assert_eq!(message, "needs a departing airport");
        }
        other => panic!("expected incomplete-search error, got {other:?}"),
    }
}

#[test]
fn itinerary_errors_surface_at_url_not_at_mutation() {
    // Mutation always succeeds; only url() judges the search.
    let search = itinerary().arriving(["JFK"]).arriving(["JNB"]);
    assert_eq!(search.legs().len(), 1);
    assert!(search.url().is_err());
}

#[test]
fn itinerary_mutators_leave_the_original_alone() {
    let base = itinerary().departing(["JFK"], no_date());
    let before = base.url().unwrap();
    let _derived = base.arriving(["JNB"]).departing(["JNB"], no_date());
    assert_eq!(base.url().unwrap(), before);
}

#[test]
fn itinerary_keeps_all_but_last_leg_complete() {
    let search = itinerary()
        .departing(["JFK"], no_date())
        .arriving(["JNB"])
        .departing(["JNB"], no_date());
    let legs = search.legs();
    assert_eq!(legs.len(), 2);
    assert!(legs[0].complete());
    assert!(!legs[1].complete());
}

#[test]
fn roundtrip_converts_to_two_leg_itinerary() {
    let search = roundtrip()
        .departing(["JFK"], PartialDate::ymd(2026, 9, 6))
        .returning(["JNB"], PartialDate::ymd(2026, 10, 12))
        .itinerary();
    assert_url(
        &search.url().unwrap(),
        "search;iti=JFK_JNB_2026-09-06*JNB_JFK_2026-10-12;tt=m",
    );
}

#[test]
fn roundtrip_conversion_keeps_absent_dates_absent() {
    let search = roundtrip()
        .departing(["JFK", "EWR"], no_date())
        .returning(["JNB"], no_date())
        .itinerary();
    assert_url(
        &search.url().unwrap(),
        "search;iti=JFK,EWR_JNB_*JNB_JFK,EWR_;tt=m",
    );
}
