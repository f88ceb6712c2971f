//! End-to-end table scenarios over a motorcycle inventory.

use motodesk_grid::{Action, Body, Column, DataTable, Dir, Gridable, Value, ViewState};

#[derive(Debug, Clone)]
struct Bike {
    id: String,
    name: String,
    model: String,
    category: String,
    price_per_day: u32,
}

impl Gridable for Bike {
    fn field_value(&self, key: &str) -> Value<'_> {
        match key {
            "id" => Value::from(&self.id),
            "name" => Value::from(&self.name),
            "model" => Value::from(&self.model),
            "category" => Value::from(&self.category),
            "pricePerDay" => Value::from(self.price_per_day),
            _ => Value::None,
        }
    }
}

fn bike(id: usize, name: &str, model: &str, category: &str, price: u32) -> Bike {
    Bike {
        id: id.to_string(),
        name: name.to_string(),
        model: model.to_string(),
        category: category.to_string(),
        price_per_day: price,
    }
}

fn fleet(n: usize) -> Vec<Bike> {
    (1..=n)
        .map(|i| bike(i, &format!("Touring {i}"), &format!("T{i}"), "Touring", 60 + i as u32))
        .collect()
}

fn bike_table() -> DataTable<Bike> {
    DataTable::new(
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("category", "Category").sortable(),
            Column::new("pricePerDay", "Price/Day")
                .sortable()
                .render(|b: &Bike| format!("${}", b.price_per_day)),
            Column::new("actions", "Actions").render(|b: &Bike| format!("view:{}", b.id)),
        ],
        ["name", "model", "category"],
    )
    .unwrap()
    .search_placeholder("Search motorcycles...")
}

#[test]
fn twenty_five_rows_make_three_pages() {
    let rows = fleet(25);
    let table = bike_table();
    let view = table.view(&rows, &ViewState::new());

    assert_eq!(view.page_count, 3);
    assert_eq!(view.page, 0);
    assert_eq!(view.filtered_count, 25);
    assert_eq!(view.placeholder, "Search motorcycles...");
    let names = view.column_cells("name");
    let expected: Vec<String> = (1..=10).map(|i| format!("Touring {i}")).collect();
    assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());

    let last = table.dispatch(ViewState::new(), &Action::LastPage, &rows);
    let view = table.view(&rows, &last);
    assert_eq!(view.page, 2);
    assert_eq!(view.rows().len(), 5);
    assert!(view.has_prev);
    assert!(!view.has_next);
}

#[test]
fn harley_search_ignores_case() {
    let mut rows = fleet(6);
    rows.insert(3, bike(99, "Harley Davidson Iron 883", "Iron 883", "Cruiser", 120));
    let table = bike_table();

    for query in ["Harley", "harley", "HARLEY", "  harley  "] {
        let state = table.dispatch(ViewState::new(), &Action::SetQuery(query.into()), &rows);
        let view = table.view(&rows, &state);
        assert_eq!(view.filtered_count, 1, "query {query:?}");
        assert_eq!(view.column_cells("name"), vec!["Harley Davidson Iron 883"]);
    }

    // model and category are searched too
    let state = ViewState::new().with_query("iron 8");
    assert_eq!(table.view(&rows, &state).filtered_count, 1);
    let state = ViewState::new().with_query("cruis");
    assert_eq!(table.view(&rows, &state).filtered_count, 1);
}

#[test]
fn price_header_clicks_cycle_through_orders() {
    let rows = vec![
        bike(1, "Iron 883", "883", "Cruiser", 120),
        bike(2, "Monster", "821", "Naked", 95),
        bike(3, "R 1250 GS", "GS", "Adventure", 150),
    ];
    let table = bike_table();
    let click = Action::ToggleSort("pricePerDay".into());

    let s1 = table.dispatch(ViewState::new(), &click, &rows);
    let v1 = table.view(&rows, &s1);
    assert_eq!(v1.column_cells("pricePerDay"), vec!["$95", "$120", "$150"]);
    assert_eq!(v1.headers[2].indicator, Some(Dir::Asc));

    let s2 = table.dispatch(s1, &click, &rows);
    let v2 = table.view(&rows, &s2);
    assert_eq!(v2.column_cells("pricePerDay"), vec!["$150", "$120", "$95"]);
    assert_eq!(v2.headers[2].indicator, Some(Dir::Desc));

    let s3 = table.dispatch(s2, &click, &rows);
    let v3 = table.view(&rows, &s3);
    assert_eq!(v3.column_cells("pricePerDay"), vec!["$120", "$95", "$150"]);
    assert_eq!(v3.headers[2].indicator, None);
}

#[test]
fn no_match_renders_placeholder_row() {
    let rows = fleet(4);
    let table = bike_table();
    let state = table.dispatch(ViewState::new(), &Action::SetQuery("vespa".into()), &rows);
    let view = table.view(&rows, &state);

    assert_eq!(view.headers.len(), 4);
    match view.body {
        Body::Empty { message, span } => {
            assert_eq!(message, "No results found.");
            assert_eq!(span, 4);
        }
        Body::Rows { .. } => panic!("expected the empty-state placeholder"),
    }
}

#[test]
fn narrowing_search_from_a_late_page_lands_on_first_page() {
    let rows = fleet(25);
    let table = bike_table();
    let state = table.dispatch(ViewState::new(), &Action::GoToPage(2), &rows);
    assert_eq!(state.page, 2);

    let state = table.dispatch(state, &Action::SetQuery("touring 1".into()), &rows);
    assert_eq!(state.page, 0);
    let view = table.view(&rows, &state);
    // Touring 1, 10..=19
    assert_eq!(view.filtered_count, 11);
    assert_eq!(view.page_count, 2);
}

#[test]
fn rows_removed_under_a_stale_page_clamp_on_view() {
    let mut rows = fleet(25);
    let table = bike_table();
    let state = table.dispatch(ViewState::new(), &Action::LastPage, &rows);
    rows.truncate(12);

    let view = table.view(&rows, &state);
    assert_eq!(view.page, 1);
    assert_eq!(view.rows().len(), 2);
}

#[test]
fn custom_cells_see_the_whole_row() {
    let rows = fleet(2);
    let view = bike_table().view(&rows, &ViewState::new());
    assert_eq!(view.column_cells("actions"), vec!["view:1", "view:2"]);
}
