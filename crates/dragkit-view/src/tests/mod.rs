mod drag_view_tests;
