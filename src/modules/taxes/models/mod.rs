mod tva_rate;

pub use tva_rate::TvaRate;
