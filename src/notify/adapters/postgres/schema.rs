//! Diesel schema for durable workflow state.

diesel::table! {
    /// Journal of completed workflow steps.
    notification_steps (instance_id, step) {
        /// Workflow instance identifier.
        instance_id -> Uuid,
        /// Step name.
        #[max_length = 100]
        step -> Varchar,
        /// Recorded step output.
        output -> Jsonb,
        /// Timestamp the step was recorded.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Durable timer registrations.
    notification_timers (instance_id, step) {
        /// Workflow instance identifier.
        instance_id -> Uuid,
        /// Step name.
        #[max_length = 100]
        step -> Varchar,
        /// Wall-clock time the workflow should resume.
        fire_at -> Timestamptz,
        /// Timestamp the timer was registered.
        registered_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(notification_steps, notification_timers);
