//! IMPORTANT!!!
//! A backend must be started up on localhost separately (Will not work in CI).
//! Only intended for local testing against a development backend seeded with
//! the demo accounts. From the folder "crates/flight-client-core" run one of
//! the following to execute the tests
//! - `wasm-pack test --headless --firefox`
//! - `wasm-pack test --headless --chrome`
use wasm_bindgen_test::wasm_bindgen_test;
use wasm_bindgen_test::wasm_bindgen_test_configure;
use flight_client_core::Client;
use flight_shared::req_args::LoginReqArgs;

wasm_bindgen_test_configure!(run_in_browser);
fn main() {
    #[wasm_bindgen_test]
    async fn login_logout_round_trip() {
        // Arrange
        // ASSUMING BACKEND HAS BEEN STARTED (See module docs comment)
        let client = Client::default();
        let login_args = LoginReqArgs::new("seed_customer".to_string(), "f".to_string().into());

        // Assert - Ensure not logged in
        assert!(!client.is_logged_in(), "should not be logged in initially");

        // Act - Login
        let user = client
            .login(login_args.clone(), no_cb)
            .await
            .unwrap()
            .expect("IMPORTANT!!! ensure backend is started properly see module doc comment");

        // Assert - Login successful and user info stored
        assert_eq!(user.username.as_ref(), &login_args.username);
        assert!(client.is_logged_in());
        assert!(client.stored_tokens().is_some());

        // Act - Logout
        client.logout();

        // Assert - Session cleared including the persisted tokens
        assert!(!client.is_logged_in());
        assert!(client.stored_tokens().is_none());
    }
}

fn no_cb() {}
