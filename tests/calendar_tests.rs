use chrono::{FixedOffset, NaiveDate, TimeZone, Weekday};
use escala::calendar::{
    CalendarDate, MonthGrid, add_months, day_number_label, days_in_month, leading_blank_count,
    month_bounds, month_year_label, weekday_label,
};

fn d(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

#[test]
fn month_bounds_cover_whole_month() {
    assert_eq!(month_bounds(d(2024, 5, 17)), (d(2024, 5, 1), d(2024, 5, 31)));
    // Leap year February
    assert_eq!(month_bounds(d(2024, 2, 10)), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(month_bounds(d(2023, 2, 28)), (d(2023, 2, 1), d(2023, 2, 28)));
    // December rolls over the year boundary
    assert_eq!(month_bounds(d(2024, 12, 1)), (d(2024, 12, 1), d(2024, 12, 31)));
}

#[test]
fn days_in_month_is_inclusive() {
    let (first, last) = month_bounds(d(2024, 4, 9));
    let days = days_in_month(first, last);
    assert_eq!(days.len(), 30);
    assert_eq!(days.first().copied(), Some(first));
    assert_eq!(days.last().copied(), Some(last));
    assert!(days.windows(2).all(|pair| pair[0].next_day() == pair[1]));
}

#[test]
fn days_in_month_empty_when_reversed() {
    assert!(days_in_month(d(2024, 5, 10), d(2024, 5, 3)).is_empty());
    assert_eq!(days_in_month(d(2024, 5, 3), d(2024, 5, 3)), vec![d(2024, 5, 3)]);
}

#[test]
fn leading_blanks_follow_sunday_first_week() {
    // 2024-09-01 is a Sunday, 2024-05-01 a Wednesday, 2024-06-01 a Saturday
    assert_eq!(leading_blank_count(d(2024, 9, 1)), 0);
    assert_eq!(leading_blank_count(d(2024, 5, 1)), 3);
    assert_eq!(leading_blank_count(d(2024, 6, 1)), 6);
}

#[test]
fn labels_use_portuguese_names() {
    assert_eq!(weekday_label(d(2024, 5, 3)), "SEXTA-FEIRA");
    assert_eq!(weekday_label(d(2024, 5, 7)), "TERÇA-FEIRA");
    assert_eq!(weekday_label(d(2024, 5, 4)), "SÁBADO");
    assert_eq!(weekday_label(d(2024, 5, 5)), "DOMINGO");
    assert_eq!(day_number_label(d(2024, 5, 3)), "3");
    assert_eq!(day_number_label(d(2024, 5, 31)), "31");
    assert_eq!(month_year_label(d(2024, 5, 17)), "MAIO/2024");
    assert_eq!(month_year_label(d(2025, 3, 1)), "MARÇO/2025");
}

#[test]
fn canonical_constructors_drop_time_of_day() {
    let morning = NaiveDate::from_ymd_opt(2024, 5, 3)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let night = NaiveDate::from_ymd_opt(2024, 5, 3)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    assert_eq!(CalendarDate::from(morning), CalendarDate::from(night));
    assert_eq!(CalendarDate::from(morning), d(2024, 5, 3));

    // Late evening in Brasília is already the next day in UTC
    let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
    let instant = brasilia.with_ymd_and_hms(2024, 5, 3, 23, 30, 0).unwrap();
    assert_eq!(CalendarDate::from_datetime(&instant), d(2024, 5, 3));
}

#[test]
fn span_is_order_independent() {
    let forward = d(2024, 5, 3).span_to(d(2024, 5, 6));
    let backward = d(2024, 5, 6).span_to(d(2024, 5, 3));
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 4);
    assert!(d(2024, 5, 4).is_between(d(2024, 5, 6), d(2024, 5, 3)));
    assert!(!d(2024, 5, 7).is_between(d(2024, 5, 6), d(2024, 5, 3)));
}

#[test]
fn add_months_lands_on_first_of_month() {
    assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 1));
    assert_eq!(add_months(d(2024, 1, 15), -1), d(2023, 12, 1));
    assert_eq!(add_months(d(2024, 11, 20), 3), d(2025, 2, 1));
    assert_eq!(add_months(d(2024, 5, 9), 0), d(2024, 5, 1));
}

#[test]
fn month_grid_places_days_after_blanks() {
    let grid = MonthGrid::for_month(d(2024, 5, 20));
    assert_eq!(grid.first_day(), d(2024, 5, 1));
    assert_eq!(grid.last_day(), d(2024, 5, 31));
    assert_eq!(grid.cells().len(), 3 + 31);
    assert!(grid.cells()[..3].iter().all(Option::is_none));
    assert_eq!(grid.cells()[3], Some(d(2024, 5, 1)));

    let weeks: Vec<_> = grid.weeks().collect();
    assert_eq!(weeks.len(), 5);
    // The first Sunday column after the blanks is May 5th
    assert_eq!(weeks[1][0], Some(d(2024, 5, 5)));
    assert_eq!(weeks[1][0].map(CalendarDate::weekday), Some(Weekday::Sun));

    assert_eq!(MonthGrid::column_labels()[0], "DOM");
    assert_eq!(MonthGrid::column_labels()[6], "SÁB");
}
