pub mod diode;
