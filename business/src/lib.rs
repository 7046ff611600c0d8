pub mod application {
    pub mod cart {
        pub mod state;
        pub mod store;
        pub mod sync;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod storage;
    pub mod auth {
        pub mod token;
    }
    pub mod cart {
        pub mod manager;
        pub mod model;
        pub mod remote;
    }
    pub mod shared {
        pub mod value_objects;
    }
}
