// Integration suite. Broker-dependent tests are #[ignore]d; run them with
// `cargo test --test integration -- --ignored` against a local RabbitMQ.

mod checkout_test;
mod connection_test;
