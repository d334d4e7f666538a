//! Integration tests for the table pipeline over realistic list views
//!
//! **Test Coverage:**
//! 1. Bus list: numeric capacity sort, status select filter
//! 2. User list: derived full-name search
//! 3. Trip list: date range, time and price filters combined with search
//! 4. Discount list: domain override predicates injected per key
//! 5. Rows decoded from a REST-style JSON payload

use pasaje_core::{Record, Row, rows_from_json};
use pasaje_pagination::PageItem;
use pasaje_tables::prelude::*;
use rstest::*;
use serde_json::json;

// ========================================================================
// Fixtures
// ========================================================================

#[fixture]
fn buses() -> Vec<Row> {
	rows_from_json(json!([
		{"unidad": "Bus 12", "placa": "PBA-1234", "capacidad": "30", "estado_texto": "Activo"},
		{"unidad": "Bus 3", "placa": "PBC-9876", "capacidad": "5", "estado_texto": "Inactivo"},
		{"unidad": "Bus 40", "placa": "GBA-5555", "capacidad": "100", "estado_texto": "Activo"}
	]))
	.unwrap()
}

#[fixture]
fn bus_engine() -> TableEngine<Row> {
	TableEngine::new()
		.with_column(ColumnSpec::new("unidad", "Unidad").kind(FieldKind::Numeric))
		.with_column(ColumnSpec::new("capacidad", "Capacidad").kind(FieldKind::Numeric))
		.with_column(ColumnSpec::new("estado_texto", "Estado").kind(FieldKind::Status))
		.with_filter(
			FilterDescriptor::select("estado_texto", "Estado")
				.option("Activo", "Activo")
				.option("Inactivo", "Inactivo"),
		)
		.searchable(["unidad", "placa"])
}

#[fixture]
fn trips() -> Vec<Row> {
	rows_from_json(json!([
		{"id": 1, "origen": "Quito", "destino": "Guayaquil", "fecha_salida": "2024-06-01T06:00:00", "hora_salida": "06:00", "precio": 12.5},
		{"id": 2, "origen": "Quito", "destino": "Cuenca", "fecha_salida": "2024-06-03T22:30:00", "hora_salida": "22:30", "precio": 15},
		{"id": 3, "origen": "Cuenca", "destino": "Loja", "fecha_salida": "2024-06-05 08:15", "hora_salida": "08:15:00", "precio": 8},
		{"id": 4, "origen": "Quito", "destino": "Loja", "fecha_salida": "por definir", "hora_salida": "06:00", "precio": 20},
		{"id": 5, "origen": "Guayaquil", "destino": "Quito", "fecha_salida": "2024-07-01", "hora_salida": "06:00", "precio": "11.00"}
	]))
	.unwrap()
}

#[fixture]
fn trip_engine() -> TableEngine<Row> {
	TableEngine::new()
		.with_column(ColumnSpec::new("precio", "Precio").kind(FieldKind::Numeric))
		.with_filter(FilterDescriptor::date("fecha_salida", "Fecha"))
		.with_filter(FilterDescriptor::time("hora_salida", "Hora"))
		.with_filter(FilterDescriptor::range("precio", "Precio"))
		.searchable(["origen", "destino"])
}

fn field(rows: &[&Row], key: &str) -> Vec<String> {
	rows.iter().map(|row| row.field_text(key)).collect()
}

// ========================================================================
// Buses
// ========================================================================

#[rstest]
fn test_capacity_sorts_numerically(buses: Vec<Row>, bus_engine: TableEngine<Row>) {
	let sort = SortState::by("capacidad", SortDirection::Ascending);
	let processed = bus_engine.process(&buses, "", &ActiveFilters::new(), &sort);
	assert_eq!(field(&processed.rows, "capacidad"), vec!["5", "30", "100"]);
}

#[rstest]
fn test_unit_number_sorts_on_digits(buses: Vec<Row>, bus_engine: TableEngine<Row>) {
	let sort = SortState::by("unidad", SortDirection::Descending);
	let processed = bus_engine.process(&buses, "", &ActiveFilters::new(), &sort);
	assert_eq!(
		field(&processed.rows, "unidad"),
		vec!["Bus 40", "Bus 12", "Bus 3"]
	);
}

#[rstest]
fn test_status_select_filter(buses: Vec<Row>, bus_engine: TableEngine<Row>) {
	let filters = ActiveFilters::new().with("estado_texto", "Activo");
	let processed = bus_engine.process(&buses, "", &filters, &SortState::unsorted());
	assert_eq!(processed.total_filtered_count, 2);
	assert!(
		field(&processed.rows, "estado_texto")
			.iter()
			.all(|estado| estado == "Activo")
	);
}

#[rstest]
fn test_search_by_plate(buses: Vec<Row>, bus_engine: TableEngine<Row>) {
	let processed = bus_engine.process(&buses, "pb", &ActiveFilters::new(), &SortState::unsorted());
	assert_eq!(field(&processed.rows, "unidad"), vec!["Bus 12", "Bus 3"]);
}

#[rstest]
fn test_status_sort_ranks_active_first(buses: Vec<Row>, bus_engine: TableEngine<Row>) {
	let sort = SortState::by("estado_texto", SortDirection::Ascending);
	let processed = bus_engine.process(&buses, "", &ActiveFilters::new(), &sort);
	assert_eq!(
		field(&processed.rows, "unidad"),
		vec!["Bus 12", "Bus 40", "Bus 3"]
	);
}

// ========================================================================
// Users
// ========================================================================

#[rstest]
fn test_derived_full_name_search() {
	let users = vec![
		Row::new().with("nombre", "Juan").with("apellido", "Pérez"),
		Row::new().with("nombre", "Lucía").with("apellido", "Vera"),
	];
	let engine = TableEngine::new().with_search_field(SearchField::derived(
		"nombreCompleto",
		|row: &Row| format!("{} {}", row.field_text("nombre"), row.field_text("apellido")),
	));
	let processed = engine.process(&users, "juan", &ActiveFilters::new(), &SortState::unsorted());
	assert_eq!(processed.total_filtered_count, 1);
	assert_eq!(processed.rows[0].field_text("apellido"), "Pérez");
}

// ========================================================================
// Trips
// ========================================================================

#[rstest]
fn test_date_range_excludes_unparsable_dates(trips: Vec<Row>, trip_engine: TableEngine<Row>) {
	let filters = ActiveFilters::new().with(
		"fecha_salida",
		FilterValue::date_range(Some("2024-06-01"), Some("2024-06-30")),
	);
	let processed = trip_engine.process(&trips, "", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "id"), vec!["1", "2", "3"]);
}

#[rstest]
fn test_single_date_filter(trips: Vec<Row>, trip_engine: TableEngine<Row>) {
	let filters = ActiveFilters::new().with("fecha_salida", "2024-06-05");
	let processed = trip_engine.process(&trips, "", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "id"), vec!["3"]);
}

#[rstest]
fn test_time_and_search_combined(trips: Vec<Row>, trip_engine: TableEngine<Row>) {
	let filters = ActiveFilters::new().with("hora_salida", "06:00");
	let processed = trip_engine.process(&trips, "quito", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "id"), vec!["1", "4", "5"]);
}

#[rstest]
fn test_price_range_with_text_prices(trips: Vec<Row>, trip_engine: TableEngine<Row>) {
	let filters =
		ActiveFilters::new().with("precio", FilterValue::range(Some(10.0), Some(15.0)));
	let sort = SortState::by("precio", SortDirection::Ascending);
	let processed = trip_engine.process(&trips, "", &filters, &sort);
	// numeric sort strips the decimal point: "12.5" -> 125, "11.00" -> 1100
	assert_eq!(field(&processed.rows, "id"), vec!["2", "1", "5"]);
}

#[rstest]
fn test_view_over_trips(trips: Vec<Row>, trip_engine: TableEngine<Row>) {
	let mut state = TableState::new(2).unwrap();
	state.current_page = 2;
	let view = trip_engine.view(&trips, &state).unwrap();
	assert_eq!(field(&view.rows, "id"), vec!["3", "4"]);
	assert_eq!(
		view.pages,
		vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
	);
}

// ========================================================================
// Discounts: domain predicates injected from the call site
// ========================================================================

#[fixture]
fn discounts() -> Vec<Row> {
	rows_from_json(json!([
		{"codigo": "ESTUDIANTE", "porcentaje": 50, "monto_fijo": null, "fecha_fin": "2099-12-31", "activo": true},
		{"codigo": "FERIADO", "porcentaje": null, "monto_fijo": 3, "fecha_fin": "2020-01-01", "activo": true},
		{"codigo": "TERCERA_EDAD", "porcentaje": 50, "monto_fijo": null, "fecha_fin": "2099-12-31", "activo": false}
	]))
	.unwrap()
}

fn discount_engine() -> TableEngine<Row> {
	TableEngine::new()
		.with_filter(
			FilterDescriptor::select("tipo_descuento", "Tipo")
				.option("porcentaje", "Porcentaje")
				.option("monto", "Monto fijo"),
		)
		.with_filter(FilterDescriptor::select("estado_descuento", "Estado"))
		.with_filter_override("tipo_descuento", |row: &Row, value: &FilterValue| {
			let is_percentage = !row.field("porcentaje").is_null();
			match value {
				FilterValue::Text(kind) if kind == "porcentaje" => is_percentage,
				FilterValue::Text(kind) if kind == "monto" => !is_percentage,
				_ => false,
			}
		})
		.with_filter_override("estado_descuento", |row: &Row, value: &FilterValue| {
			let expired = row.field_text("fecha_fin").as_str() < "2024-01-01";
			let status = match (row.field("activo").as_bool(), expired) {
				(Some(false), _) => "inactivo",
				(_, true) => "vencido",
				_ => "vigente",
			};
			matches!(value, FilterValue::Text(wanted) if wanted == status)
		})
		.searchable(["codigo"])
}

#[rstest]
#[case("porcentaje", vec!["ESTUDIANTE", "TERCERA_EDAD"])]
#[case("monto", vec!["FERIADO"])]
fn test_discount_type_override(
	discounts: Vec<Row>,
	#[case] kind: &str,
	#[case] expected: Vec<&str>,
) {
	let filters = ActiveFilters::new().with("tipo_descuento", kind);
	let processed = discount_engine().process(&discounts, "", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "codigo"), expected);
}

#[rstest]
#[case("vigente", vec!["ESTUDIANTE"])]
#[case("vencido", vec!["FERIADO"])]
#[case("inactivo", vec!["TERCERA_EDAD"])]
fn test_discount_status_override(
	discounts: Vec<Row>,
	#[case] status: &str,
	#[case] expected: Vec<&str>,
) {
	let filters = ActiveFilters::new().with("estado_descuento", status);
	let processed = discount_engine().process(&discounts, "", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "codigo"), expected);
}

#[rstest]
fn test_overrides_combine_with_generic_filters(discounts: Vec<Row>) {
	let filters = ActiveFilters::new()
		.with("tipo_descuento", "porcentaje")
		.with("activo", "true");
	let processed = discount_engine().process(&discounts, "", &filters, &SortState::unsorted());
	assert_eq!(field(&processed.rows, "codigo"), vec!["ESTUDIANTE"]);
}
