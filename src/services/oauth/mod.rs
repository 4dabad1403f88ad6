pub mod oura;
