mod common;

use bookdash::{
    export::{self, CsvFormat},
    types::{AuthorDetail, Column, EnrichedBookRecord, NOT_AVAILABLE},
    TableController,
};
use common::{book, detail, FakeSource};
use pretty_assertions::assert_eq;

const HEADER: &str = "Title,Author Name,First Publish Year,Subject,Author Birth Date,Author Top Work,Ratings Average";

async fn controller_with(source: FakeSource) -> TableController<FakeSource> {
    let mut controller = TableController::new(source);
    controller.load().await.unwrap();
    controller
}

#[tokio::test]
async fn raw_export_splits_back_into_records() {
    let mut first = book("OL1W", "Beren and Luthien", "J.R.R. Tolkien", "OL1A", Some(2017));
    first.subjects = vec!["Elves".into()];
    let second = book("OL2W", "Anathem", "Neal Stephenson", "OL2A", None);
    let source = FakeSource::new(vec![first, second])
        .with_author("OL1A", detail("3 January 1892", "The Hobbit", Some(4.5)));
    let mut controller = controller_with(source).await;
    controller.request_sort(Column::Title);

    let csv = controller.export_csv(CsvFormat::Raw).unwrap();
    let rows: Vec<Vec<&str>> = csv.split('\n').map(|line| line.split(',').collect()).collect();
    assert_eq!(rows.len(), controller.books().len() + 1);
    assert_eq!(rows[0].join(","), HEADER);
    // Descending by title: Beren before Anathem.
    assert_eq!(
        rows[1],
        vec!["Beren and Luthien", "J.R.R. Tolkien", "2017", "Elves", "3 January 1892", "The Hobbit", "4.5"]
    );
    assert_eq!(
        rows[2],
        vec!["Anathem", "Neal Stephenson", "", "", NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE]
    );
    assert!(!csv.ends_with('\n'));
}

#[tokio::test]
async fn quoted_export_parses_back_with_csv_reader() {
    let mut hobbit = book("OL1W", "The Hobbit, or There and Back Again", "J.R.R. Tolkien", "OL1A", Some(1937));
    hobbit.author_names.push("Christopher \"CT\" Tolkien".into());
    hobbit.subjects = vec!["Fantasy".into(), "Dragons".into()];
    let controller = controller_with(FakeSource::new(vec![hobbit])).await;

    let csv = controller.export_csv(CsvFormat::Quoted).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, Column::ALL.map(|c| c.header().to_string()).to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(&record[0], "The Hobbit, or There and Back Again");
    assert_eq!(&record[1], "J.R.R. Tolkien, Christopher \"CT\" Tolkien");
    assert_eq!(&record[2], "1937");
    assert_eq!(&record[3], "Fantasy, Dragons");
    assert_eq!(&record[6], NOT_AVAILABLE);
}

#[test]
fn empty_table_still_has_a_header() {
    assert_eq!(export::to_csv(&[], CsvFormat::Raw).unwrap(), HEADER);
    assert_eq!(
        export::to_csv(&[], CsvFormat::Quoted).unwrap(),
        format!("{HEADER}\n")
    );
}

#[test]
fn export_follows_given_order_not_load_order() {
    let a = EnrichedBookRecord::enrich(
        book("OL1W", "Zeta", "A", "OL1A", None),
        AuthorDetail::unavailable(),
    );
    let b = EnrichedBookRecord::enrich(
        book("OL2W", "Alpha", "B", "OL2A", None),
        AuthorDetail::unavailable(),
    );
    let csv = export::to_csv(&[&b, &a], CsvFormat::Raw).unwrap();
    let titles: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Zeta"]);
}

#[test]
fn write_file_creates_the_export() {
    let path = std::env::temp_dir().join(format!("bookdash-export-{}.csv", std::process::id()));
    export::write_file(&path, HEADER).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);
    std::fs::remove_file(&path).unwrap();
}
