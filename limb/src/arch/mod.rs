//! Architecture dependent definitions: limb width and carry primitives.

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "16")] {
        #[path = "generic_32_bit/word.rs"]
        pub mod word;
    } else if #[cfg(target_pointer_width = "32")] {
        #[path = "generic_32_bit/word.rs"]
        pub mod word;
    } else {
        #[path = "generic_64_bit/word.rs"]
        pub mod word;
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_pointer_width = "64"))] {
        #[path = "x86_64/add.rs"]
        pub mod add;
    } else {
        #[path = "generic/add.rs"]
        pub mod add;
    }
}
