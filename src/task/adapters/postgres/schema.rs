//! Diesel schema for task persistence.

diesel::table! {
    /// Task records keyed by their `YYMMDDnnn` identifier.
    tasks (id) {
        /// Date-prefixed task identifier.
        #[max_length = 9]
        id -> Varchar,
        /// Task title.
        title -> Text,
        /// Task description.
        description -> Text,
        /// Opaque status tag.
        status -> Text,
        /// Due date.
        due_date -> Timestamptz,
        /// Assigned user identifiers, in submitted order.
        assignee_ids -> Array<Text>,
    }
}

diesel::table! {
    /// Greatest identifier ever inserted for each day.
    task_id_high_water (day_prefix) {
        /// `YYMMDD` day prefix.
        #[max_length = 6]
        day_prefix -> Varchar,
        /// Highest identifier minted on that day, deleted tasks included.
        #[max_length = 9]
        last_id -> Varchar,
    }
}
