use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Error, Result},
    types::{Column, EnrichedBookRecord},
};

pub const DEFAULT_FILE_NAME: &str = "books.csv";
pub const MIME_TYPE: &str = "text/csv";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CsvFormat {
    /// Proper CSV, fields with commas, quotes or newlines are quoted.
    #[default]
    Quoted,
    /// Plain comma joined fields without any escaping. List fields contain
    /// `, ` so such a file does not split back into the same columns.
    Raw,
}

#[derive(Debug, Default, Serialize)]
pub struct Export {
    #[serde(rename = "Title")]
    title:              String,
    #[serde(rename = "Author Name")]
    author_name:        String,
    #[serde(rename = "First Publish Year")]
    first_publish_year: String,
    #[serde(rename = "Subject")]
    subject:            String,
    #[serde(rename = "Author Birth Date")]
    author_birth_date:  String,
    #[serde(rename = "Author Top Work")]
    author_top_work:    String,
    #[serde(rename = "Ratings Average")]
    ratings_average:    String,
}

impl Export {
    pub fn new(book: &EnrichedBookRecord) -> Self {
        let field = |column| book.cell(column).to_string();
        Self {
            title:              field(Column::Title),
            author_name:        field(Column::AuthorName),
            first_publish_year: field(Column::FirstPublishYear),
            subject:            field(Column::Subject),
            author_birth_date:  field(Column::AuthorBirthDate),
            author_top_work:    field(Column::AuthorTopWork),
            ratings_average:    field(Column::RatingsAverage),
        }
    }

    fn fields(&self) -> [&str; 7] {
        [
            &self.title,
            &self.author_name,
            &self.first_publish_year,
            &self.subject,
            &self.author_birth_date,
            &self.author_top_work,
            &self.ratings_average,
        ]
    }
}

/// Header row plus one row per book, in the order given.
pub fn to_csv(books: &[&EnrichedBookRecord], format: CsvFormat) -> Result<String> {
    let rows = books.iter().map(|book| Export::new(book));
    match format {
        CsvFormat::Quoted => {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(Vec::new());
            wtr.write_record(Column::ALL.map(|c| c.header()))?;
            for row in rows {
                wtr.serialize(row)?;
            }
            let bytes = wtr.into_inner().map_err(|e| Error::Io(e.into_error()))?;
            String::from_utf8(bytes)
                .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
        }
        CsvFormat::Raw => {
            let header = Column::ALL.map(|c| c.header()).join(",");
            let lines = rows.map(|row| row.fields().join(","));
            Ok(std::iter::once(header)
                .chain(lines)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    info!("Wrote {} bytes of {MIME_TYPE} to {}", contents.len(), path.display());
    Ok(())
}
