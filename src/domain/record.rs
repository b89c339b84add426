//! Batch records and their grouping by building

use indexmap::IndexMap;

/// One row of the daily record file
///
/// Columns are kept in file order. A record is never modified after it is read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Creates a record from column/value pairs
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a column, if the record has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Values for `headers` in header order; absent columns yield an empty string
    pub fn project<'a>(&'a self, headers: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        headers.iter().map(move |h| self.get(h).unwrap_or(""))
    }

    /// Number of columns in this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Records sharing one building, in encounter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingGroup {
    /// Trimmed building name as it appears in the record file
    pub building: String,

    /// Records for this building
    pub records: Vec<Record>,
}

impl BuildingGroup {
    /// Number of records in the group
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Groups records by the trimmed value of `building_column`
///
/// Key equality is exact after trimming, so names that differ only in punctuation
/// form separate groups. Groups are returned in first-encounter order. A record
/// without the column is grouped under the empty name.
pub fn group_by_building(records: Vec<Record>, building_column: &str) -> Vec<BuildingGroup> {
    let mut groups: IndexMap<String, Vec<Record>> = IndexMap::new();
    for record in records {
        let building = record.get(building_column).unwrap_or("").trim().to_string();
        groups.entry(building).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(building, records)| BuildingGroup { building, records })
        .collect()
}
