pub mod reco;
