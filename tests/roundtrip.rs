mod common;

use dabiao_tools::io::{excel_read, excel_write};
use dabiao_tools::model::{Amount, BillingRow, BillingSheet, Cell, TitleRow};
use dabiao_tools::transform::{allocate_postage, build_billing_sheet};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use tempfile::tempdir;

use common::{num, text, write_rows};

fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

#[test]
fn billing_sheet_roundtrip_preserves_rows() {
    let sheet = BillingSheet {
        title: TitleRow {
            label: "Springbadge".to_string(),
            summary: "邮12，4.00/人".to_string(),
        },
        rows: vec![
            BillingRow::new(dec("14.00"), "A001", "Alicebadge*2,Bobbadge*1"),
            BillingRow::new(Amount::Text("free".to_string()), "12345", ""),
            BillingRow::new(Amount::Blank, "C003", "Carolbadge*1"),
            BillingRow::new(dec("33.34"), "D004", "Davebadge*3"),
        ],
    };

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("billing.xlsx");
    excel_write::write_billing_sheet(&xlsx_path, &sheet).expect("billing sheet written");
    let restored = excel_read::read_billing_sheet(&xlsx_path).expect("billing sheet read");

    assert_eq!(sheet, restored);
}

#[test]
fn written_sheet_starts_with_column_labels_then_title() {
    let sheet = BillingSheet::new("Spring", vec![BillingRow::new(dec("1.5"), "A001", "Alice*1")]);

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("billing.xlsx");
    excel_write::write_billing_sheet(&xlsx_path, &sheet).expect("billing sheet written");
    let raw = excel_read::read_raw_table(&xlsx_path).expect("raw table read");

    assert_eq!(raw[0], vec![text("金额"), text("cn"), text("制品")]);
    assert_eq!(raw[1][0], text("Spring"));
    assert_eq!(raw[2], vec![num(1.5), text("A001"), text("Alice*1")]);
}

#[test]
fn order_sheet_read_from_disk_matches_in_memory_pipeline() {
    let rows = vec![
        vec![text("order form")],
        vec![text("金额"), text("cn"), text("Alice"), text("Bob")],
        vec![text("price"), Cell::Empty, num(5.0), num(7.5)],
        vec![text("stock"), Cell::Empty, num(10.0), num(10.0)],
        vec![num(17.5), text("A001"), num(2.0), num(1.0)],
        vec![num(7.5), text("B002"), Cell::Empty, num(1.0)],
    ];

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("orders.xlsx");
    write_rows(&xlsx_path, &rows);

    let raw = excel_read::read_raw_table(&xlsx_path).expect("order sheet read");
    let layout = Default::default();
    let from_disk = build_billing_sheet(raw, "Spring", "", &layout).expect("pipeline ran");
    let in_memory = build_billing_sheet(rows, "Spring", "", &layout).expect("pipeline ran");

    assert_eq!(from_disk, in_memory);
    assert_eq!(
        from_disk.rows,
        vec![
            BillingRow::new(dec("17.5"), "A001", "Alice*2,Bob*1"),
            BillingRow::new(dec("7.5"), "B002", "Bob*1"),
        ]
    );
}

#[test]
fn leading_blank_rows_keep_their_positions() {
    let rows = vec![
        Vec::new(),
        vec![Cell::Empty, text("cn"), text("Alice")],
        vec![Cell::Empty],
        vec![Cell::Empty],
        vec![num(3.0), text("A001"), num(1.0)],
    ];

    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("orders.xlsx");
    write_rows(&xlsx_path, &rows);

    let raw = excel_read::read_raw_table(&xlsx_path).expect("order sheet read");
    let sheet = build_billing_sheet(raw, "Spring", "", &Default::default()).expect("pipeline ran");
    let sheet = allocate_postage(sheet, dec("1"));

    assert_eq!(sheet.rows, vec![BillingRow::new(dec("4.00"), "A001", "Alice*1")]);
}
