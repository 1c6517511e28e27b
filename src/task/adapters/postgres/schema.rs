//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Int4,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Scheduling priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Optional deadline.
        due_date -> Nullable<Timestamptz>,
        /// Optional assignee.
        #[max_length = 100]
        assigned_to -> Nullable<Varchar>,
    }
}
