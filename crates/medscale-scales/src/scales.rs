pub mod cha2ds2_vasc;
pub mod ckd_epi;
pub mod phoenix;
pub mod stop_bang;
