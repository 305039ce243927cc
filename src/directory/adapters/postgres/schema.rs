//! Diesel schema for directory persistence.

diesel::table! {
    /// User profiles mirrored from the identity provider.
    users (id) {
        /// Provider-issued user identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Email address.
        #[max_length = 320]
        email -> Varchar,
        /// Optional avatar image URL.
        image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Workspace records.
    workspaces (id) {
        /// Provider-issued workspace identifier.
        #[max_length = 255]
        id -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// URL slug.
        #[max_length = 255]
        slug -> Varchar,
        /// Optional image URL.
        image_url -> Nullable<Text>,
        /// Owning user identifier.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Workspace membership records.
    workspace_members (workspace_id, user_id) {
        /// Workspace identifier.
        #[max_length = 255]
        workspace_id -> Varchar,
        /// Member user identifier.
        #[max_length = 255]
        user_id -> Varchar,
        /// Member role.
        #[max_length = 50]
        role -> Varchar,
        /// Optional invitation message.
        message -> Nullable<Text>,
        /// Timestamp the membership was recorded.
        added_at -> Timestamptz,
    }
}

diesel::joinable!(workspace_members -> workspaces (workspace_id));
diesel::joinable!(workspace_members -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, workspaces, workspace_members);
