pub mod extension_host;
