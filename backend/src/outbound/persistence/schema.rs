//! Diesel table definitions matching the embedded migrations.

diesel::table! {
    demo_bookings (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Text,
        email -> Text,
        phone -> Text,
        grade -> Text,
        message -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        seq -> Int8,
        username -> Text,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(demo_bookings, users);
