//! Property-based tests for the table pipeline
//!
//! Uses proptest to check the pipeline laws over arbitrary datasets:
//! - search with an empty query is the identity
//! - processing is idempotent
//! - every filter only narrows, and filters compose as a conjunction
//! - sorting is stable and the two directions mirror each other
//! - pagination covers every processed row exactly once

use pasaje_core::{Record, Row};
use pasaje_tables::prelude::*;
use proptest::prelude::*;

const STATUSES: [&str; 3] = ["Activo", "Inactivo", "Mantenimiento"];
const CITIES: [&str; 4] = ["Quito", "Cuenca", "Loja", "Ambato"];

fn row_strategy() -> impl Strategy<Value = (u32, usize, usize)> {
	(0u32..500, 0..STATUSES.len(), 0..CITIES.len())
}

fn dataset(max: usize) -> impl Strategy<Value = Vec<Row>> {
	prop::collection::vec(row_strategy(), 0..max).prop_map(|specs| {
		specs
			.into_iter()
			.enumerate()
			.map(|(id, (capacidad, estado, ciudad))| {
				Row::new()
					.with("id", id as i64)
					.with("capacidad", capacidad as i64)
					.with("estado_texto", STATUSES[estado])
					.with("ciudad", CITIES[ciudad])
			})
			.collect()
	})
}

fn engine() -> TableEngine<Row> {
	TableEngine::new()
		.with_column(ColumnSpec::new("capacidad", "Capacidad").kind(FieldKind::Numeric))
		.with_column(ColumnSpec::new("estado_texto", "Estado").kind(FieldKind::Status))
		.with_column(ColumnSpec::new("ciudad", "Ciudad"))
		.with_filter(FilterDescriptor::select("estado_texto", "Estado"))
		.with_filter(FilterDescriptor::select("ciudad", "Ciudad"))
		.with_filter(FilterDescriptor::range("capacidad", "Capacidad"))
		.searchable(["ciudad", "estado_texto"])
}

fn ids(rows: &[&Row]) -> Vec<String> {
	rows.iter().map(|row| row.field_text("id")).collect()
}

proptest! {
	#[test]
	fn test_empty_query_is_identity(rows in dataset(40), blanks in "[ \t]{0,4}") {
		let processed = engine().process(&rows, &blanks, &ActiveFilters::new(), &SortState::unsorted());
		let all: Vec<&Row> = rows.iter().collect();
		prop_assert_eq!(ids(&processed.rows), ids(&all));
	}

	#[test]
	fn test_processing_is_idempotent(
		rows in dataset(40),
		ciudad in 0..CITIES.len(),
		descending in any::<bool>(),
	) {
		let engine = engine();
		let filters = ActiveFilters::new().with("ciudad", CITIES[ciudad]);
		let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
		let sort = SortState::by("capacidad", direction);

		let first = engine.process(&rows, "", &filters, &sort);
		let again: Vec<Row> = first.rows.iter().map(|row| (*row).clone()).collect();
		let second = engine.process(&again, "", &filters, &sort);
		prop_assert_eq!(ids(&first.rows), ids(&second.rows));
	}

	#[test]
	fn test_filters_are_a_conjunction(
		rows in dataset(40),
		estado in 0..STATUSES.len(),
		ciudad in 0..CITIES.len(),
		max in 0.0f64..500.0,
	) {
		let engine = engine();
		let none = SortState::unsorted();
		let a = ActiveFilters::new().with("estado_texto", STATUSES[estado]);
		let b = ActiveFilters::new().with("ciudad", CITIES[ciudad]);
		let c = ActiveFilters::new().with("capacidad", FilterValue::range(None, Some(max)));
		let all = ActiveFilters::new()
			.with("estado_texto", STATUSES[estado])
			.with("ciudad", CITIES[ciudad])
			.with("capacidad", FilterValue::range(None, Some(max)));

		let combined = ids(&engine.process(&rows, "", &all, &none).rows);
		for single in [&a, &b, &c] {
			let narrowed = ids(&engine.process(&rows, "", single, &none).rows);
			prop_assert!(combined.iter().all(|id| narrowed.contains(id)));
		}
		let expected: Vec<String> = rows
			.iter()
			.filter(|row| {
				row.field_text("estado_texto") == STATUSES[estado]
					&& row.field_text("ciudad") == CITIES[ciudad]
					&& row.field("capacidad").to_number() <= max
			})
			.map(|row| row.field_text("id"))
			.collect();
		prop_assert_eq!(combined, expected);
	}

	#[test]
	fn test_sort_is_stable(rows in dataset(40)) {
		let sort = SortState::by("estado_texto", SortDirection::Ascending);
		let processed = engine().process(&rows, "", &ActiveFilters::new(), &sort);
		let ranking = StatusRanking::default();
		for pair in processed.rows.windows(2) {
			let (left, right) = (pair[0], pair[1]);
			let (lr, rr) = (
				ranking.rank(&left.field_text("estado_texto")),
				ranking.rank(&right.field_text("estado_texto")),
			);
			prop_assert!(lr <= rr);
			if lr == rr {
				// ties keep their input order
				prop_assert!(left.field("id").to_number() < right.field("id").to_number());
			}
		}
	}

	#[test]
	fn test_directions_mirror_without_ties(
		values in prop::collection::hash_set(0u32..10_000, 0..30),
	) {
		let rows: Vec<Row> = values
			.into_iter()
			.map(|capacidad| Row::new().with("capacidad", capacidad as i64))
			.collect();
		let engine = engine();
		let none = ActiveFilters::new();
		let ascending = engine.process(&rows, "", &none, &SortState::by("capacidad", SortDirection::Ascending));
		let descending = engine.process(&rows, "", &none, &SortState::by("capacidad", SortDirection::Descending));

		let mut reversed: Vec<String> = descending.rows.iter().map(|row| row.field_text("capacidad")).collect();
		reversed.reverse();
		let forward: Vec<String> = ascending.rows.iter().map(|row| row.field_text("capacidad")).collect();
		prop_assert_eq!(forward, reversed);
	}

	#[test]
	fn test_pages_cover_processed_rows(
		rows in dataset(60),
		rows_per_page in 1usize..15,
		query in prop::sample::select(vec!["", "quito", "activo", "a"]),
	) {
		let engine = engine();
		let mut state = TableState::new(rows_per_page).unwrap();
		state.set_query(query);
		let processed = engine.process_state(&rows, &state);
		let total_pages = state.total_pages(processed.total_filtered_count);

		let mut seen = Vec::new();
		for page in 1..=total_pages {
			state.current_page = page;
			let view = engine.view(&rows, &state).unwrap();
			prop_assert!(view.rows.len() <= rows_per_page);
			prop_assert!(!view.rows.is_empty());
			seen.extend(ids(&view.rows));
		}
		prop_assert_eq!(seen, ids(&processed.rows));
	}
}
