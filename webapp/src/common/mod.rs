pub mod dom;
pub mod storage;

#[cfg(all(test, target_arch = "wasm32"))]
pub mod fixture;
