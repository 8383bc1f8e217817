pub mod contact_view;
