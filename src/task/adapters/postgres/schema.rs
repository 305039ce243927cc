//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project identifier.
        project_id -> Uuid,
        /// Short title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Due date.
        due_date -> Timestamptz,
        /// Completion status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional assignee user identifier.
        #[max_length = 255]
        assignee_id -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comment records.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Author user identifier.
        #[max_length = 255]
        author_id -> Varchar,
        /// Comment content.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(tasks, comments);
