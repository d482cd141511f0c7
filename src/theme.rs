pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        // Base colors
        pub const OVERLAY1: Color = Color::Rgb(127, 132, 156);  // Dim source rows

        // Accents
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
    }
}
