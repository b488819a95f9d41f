pub mod mock_zephr_server;
