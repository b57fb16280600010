pub mod label_overlay;
