//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning workspace identifier.
        #[max_length = 255]
        workspace_id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Delivery status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Completion percentage.
        progress -> SmallInt,
        /// Optional team lead user identifier.
        #[max_length = 255]
        team_lead -> Nullable<Varchar>,
        /// Optional planned start date.
        start_date -> Nullable<Timestamptz>,
        /// Optional planned end date.
        end_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project membership records.
    project_members (project_id, user_id) {
        /// Project identifier.
        project_id -> Uuid,
        /// Member user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Timestamp the membership was recorded.
        added_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(projects, project_members);
