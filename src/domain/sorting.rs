use crate::domain::task::Task;
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting tasks in list views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Status,
    Position,
    Created,
    Updated,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "status" => Ok(SortField::Status),
            "position" => Ok(SortField::Position),
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: id, title, status, position, created, updated",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts a slice of tasks in place by the given field and direction.
///
/// `Position` sorts by the fractional sort key within a column; combined
/// with a `Status` pre-grouping it reproduces the board display order.
pub fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let cmp = match field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Status => a.status.code().cmp(&b.status.code()),
            SortField::Position => compare_positions(a.sort_order, b.sort_order),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Updated => a.updated_at.cmp(&b.updated_at),
        };

        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

/// Compare fractional sort positions, treating incomparable values as equal
pub(crate) fn compare_positions(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
