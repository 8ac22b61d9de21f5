pub mod pnm;
