mod show_history;
