pub mod payment_app;
